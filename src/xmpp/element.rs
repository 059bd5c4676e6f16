/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::Cursor;
use crate::CursorMut;
use crate::Document;
use crate::Ns;

use super::XmppError;

/// Shared primitives of every value backed by its own XML element.
///
/// Implementors own a [Document] whose root is their element. All the
/// provided methods work on that root element.
pub trait XmlElement {
    fn document(&self) -> &Document;

    fn document_mut(&mut self) -> &mut Document;

    fn element(&self) -> Cursor<'_> {
        self.document().root()
    }

    fn element_mut(&mut self) -> CursorMut<'_> {
        self.document_mut().root_mut()
    }

    /// Value of the attribute. An empty value reads as absent.
    fn attribute(&self, name: &str) -> Option<&str> {
        self.element()
            .attribute(name)
            .filter(|value| !value.is_empty())
    }

    /// Sets the attribute verbatim, or removes it with None.
    fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<(), XmppError> {
        self.element_mut().set_attribute(name, value)?;
        Ok(())
    }

    /// Text of the first matching child element.
    fn child_text(&self, name: &str, ns: Ns<'_>) -> Option<String> {
        self.element().child_text(name, ns)
    }

    /// Sets the text of the first matching child element.
    ///
    /// None removes the child if there is one and never creates it.
    /// An empty string creates the child with no content.
    fn set_child_text(
        &mut self,
        name: &str,
        ns: Ns<'_>,
        text: Option<&str>,
    ) -> Result<(), XmppError> {
        self.element_mut().set_child_text(name, ns, text)?;
        Ok(())
    }

    /// Language of the first matching child element.
    fn child_lang(&self, name: &str, ns: Ns<'_>) -> Option<&str> {
        self.element()
            .find_element(name, ns)
            .attribute("xml:lang")
            .filter(|lang| !lang.is_empty())
    }

    /// Sets the language of the first matching child element. Nothing
    /// happens if the child does not exist.
    fn set_child_lang(
        &mut self,
        name: &str,
        ns: Ns<'_>,
        lang: Option<&str>,
    ) -> Result<(), XmppError> {
        self.element_mut().set_child_lang(name, ns, lang)?;
        Ok(())
    }

    fn first_child(&self, name: &str, ns: Ns<'_>) -> Option<Cursor<'_>> {
        let child = self.element().find_element(name, ns);
        if child.is_null() { None } else { Some(child) }
    }

    fn children<'a>(&'a self, name: &'a str, ns: Ns<'a>) -> impl Iterator<Item = Cursor<'a>>
    where
        Self: Sized,
    {
        self.element().elements_named(name, ns)
    }

    /// Appends an empty child element and returns it for further edits.
    fn add_child(&mut self, name: &str, ns: Ns<'_>) -> Result<CursorMut<'_>, XmppError> {
        Ok(self.element_mut().insert_element(name, ns)?)
    }

    /// Serializes the element without an XML declaration.
    fn to_xml(&self) -> String {
        self.document().to_string()
    }
}
