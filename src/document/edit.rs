/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::arena::NodeId;

use super::Attribute;
use super::Cursor;
use super::Document;
use super::DocumentError;
use super::NodePayload;
use super::Ns;
use super::Tag;
use super::error::description;
use super::namespace::declaration_name;
use super::namespace::declared_prefix;
use super::namespace::split_name;

/// An editing position in a [Document].
///
/// Unlike [Cursor], a mutable cursor always points to a node. Methods
/// which create a node consume the cursor and return one pointing to
/// the new node, so edits chain naturally:
///
/// ```
/// # use tinder::Document;
/// let mut doc = Document::new("a")?;
/// doc.root_mut().insert_tag("b")?.insert_cdata("text")?;
/// assert_eq!(doc.to_string(), "<a><b>text</b></a>");
/// # Ok::<(), tinder::DocumentError>(())
/// ```
pub struct CursorMut<'a> {
    doc: &'a mut Document,
    node: u32,
}

impl<'a> CursorMut<'a> {
    pub(super) fn new(doc: &'a mut Document, node: u32) -> CursorMut<'a> {
        CursorMut { doc, node }
    }

    /// Shorter lived cursor on the same node, for the consuming methods.
    pub fn reborrow(&mut self) -> CursorMut<'_> {
        CursorMut {
            doc: &mut *self.doc,
            node: self.node,
        }
    }

    fn check_tag(&self, error: &'static str) -> Result<(), DocumentError> {
        if self.doc.tag(self.node).is_none() {
            return Err(DocumentError::BadXml(error));
        }
        Ok(())
    }

    fn find_child(&self, local_name: &str, ns: Ns<'_>) -> Option<u32> {
        self.as_cursor().find_element(local_name, ns).node
    }

    pub fn as_cursor(&self) -> Cursor<'_> {
        Cursor::new(self.doc, Some(self.node))
    }

    pub fn id(&self) -> NodeId {
        self.doc.arena.handle(self.node)
    }

    pub fn is_tag(&self) -> bool {
        self.doc.tag(self.node).is_some()
    }

    pub fn parent(self) -> Option<CursorMut<'a>> {
        let parent = self.doc.node(self.node).parent?;
        Some(CursorMut::new(self.doc, parent))
    }

    pub fn find_element(self, local_name: &str, ns: Ns<'_>) -> Option<CursorMut<'a>> {
        let child = self.find_child(local_name, ns)?;
        Some(CursorMut::new(self.doc, child))
    }

    /// Borrows the first matching child element without giving up this cursor.
    pub fn child_mut(&mut self, local_name: &str, ns: Ns<'_>) -> Option<CursorMut<'_>> {
        let child = self.find_child(local_name, ns)?;
        Some(CursorMut::new(&mut *self.doc, child))
    }

    /// Appends a child tag which takes its namespace from the declarations
    /// in scope.
    pub fn insert_tag(self, qualified_name: &str) -> Result<CursorMut<'a>, DocumentError> {
        self.check_tag(description::CDATA_CHILDREN)?;
        if qualified_name.is_empty() {
            return Err(DocumentError::BadXml(description::EMPTY_NAME));
        }
        let (prefix, _) = split_name(qualified_name);
        let namespace = self
            .doc
            .lookup_namespace(Some(self.node), prefix)
            .map(str::to_string);
        if prefix.is_some() && namespace.is_none() {
            return Err(DocumentError::BadXml(description::UNBOUND_PREFIX));
        }
        let tag = Tag::new(qualified_name, namespace);
        let new = self.doc.alloc_node(NodePayload::Tag(tag))?;
        self.doc.link_last(self.node, new);
        Ok(CursorMut::new(self.doc, new))
    }

    /// Appends a child tag in the given namespace, declaring the
    /// namespace on the new tag unless it is already in scope.
    pub fn insert_tag_ns(
        self,
        qualified_name: &str,
        namespace: &str,
    ) -> Result<CursorMut<'a>, DocumentError> {
        self.check_tag(description::CDATA_CHILDREN)?;
        if qualified_name.is_empty() {
            return Err(DocumentError::BadXml(description::EMPTY_NAME));
        }
        let (prefix, _) = split_name(qualified_name);
        let in_scope = self.doc.lookup_namespace(Some(self.node), prefix) == Some(namespace);
        let mut tag = Tag::new(qualified_name, Some(namespace.to_string()));
        if !in_scope {
            tag.attributes.push(Attribute {
                name: declaration_name(prefix),
                value: namespace.to_string(),
            });
        }
        let new = self.doc.alloc_node(NodePayload::Tag(tag))?;
        self.doc.link_last(self.node, new);
        Ok(CursorMut::new(self.doc, new))
    }

    /// Appends a child element named by its local name and a namespace
    /// filter. [Ns::Uri] places the element in that namespace, the other
    /// filters inherit the namespace in scope.
    pub fn insert_element(
        self,
        local_name: &str,
        ns: Ns<'_>,
    ) -> Result<CursorMut<'a>, DocumentError> {
        match ns {
            Ns::Uri(uri) => self.insert_tag_ns(local_name, uri),
            Ns::Default | Ns::Any => self.insert_tag(local_name),
        }
    }

    /// Appends character data, merging it with a trailing CDATA child.
    pub fn insert_cdata(self, cdata: &str) -> Result<CursorMut<'a>, DocumentError> {
        self.check_tag(description::CDATA_CHILDREN)?;
        let last = self.doc.tag(self.node).and_then(|tag| tag.last_child);
        if let Some(last) = last
            && let NodePayload::CData(text) = &mut self.doc.node_mut(last).payload
        {
            text.push_str(cdata);
            return Ok(CursorMut::new(self.doc, last));
        }
        let new = self
            .doc
            .alloc_node(NodePayload::CData(cdata.to_string()))?;
        self.doc.link_last(self.node, new);
        Ok(CursorMut::new(self.doc, new))
    }

    /// Sets or, with None, removes an attribute.
    pub fn set_attribute(
        &mut self,
        name: &str,
        value: Option<&str>,
    ) -> Result<&mut Self, DocumentError> {
        self.check_tag(description::CDATA_ATTRIBUTE)?;
        let tag = self.doc.tag_mut(self.node);
        match value {
            None => tag.attributes.retain(|attr| attr.name != name),
            Some(value) => match tag.attributes.iter_mut().find(|attr| attr.name == name) {
                Some(attr) => {
                    attr.value.clear();
                    attr.value.push_str(value);
                }
                None => tag.attributes.push(Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                }),
            },
        }
        if declared_prefix(name).is_some() {
            self.doc.resolve_namespaces(self.node);
        }
        Ok(self)
    }

    /// Replaces all content of the tag with the text.
    pub fn set_text(&mut self, text: &str) -> Result<&mut Self, DocumentError> {
        self.check_tag(description::CDATA_CHILDREN)?;
        self.clear();
        if !text.is_empty() {
            self.reborrow().insert_cdata(text)?;
        }
        Ok(self)
    }

    /// Removes every child node.
    pub fn clear(&mut self) {
        while let Some(child) = self.doc.tag(self.node).and_then(|tag| tag.first_child) {
            self.doc.release(child);
        }
    }

    /// Removes the child elements matching the name and namespace, and
    /// returns how many were removed.
    pub fn remove_children(&mut self, local_name: &str, ns: Ns<'_>) -> usize {
        let matching: Vec<u32> = self
            .as_cursor()
            .elements_named(local_name, ns)
            .filter_map(|child| child.node)
            .collect();
        for child in &matching {
            self.doc.release(*child);
        }
        matching.len()
    }

    /// Removes the node and its subtree. The root element cannot be removed.
    pub fn remove(self) {
        self.doc.release(self.node);
    }

    /// Sets the text of the first matching child element.
    ///
    /// With None the child is removed. A missing child is created only
    /// when there is text to set.
    pub fn set_child_text(
        &mut self,
        local_name: &str,
        ns: Ns<'_>,
        text: Option<&str>,
    ) -> Result<(), DocumentError> {
        let existing = self.find_child(local_name, ns);
        match (existing, text) {
            (Some(child), None) => self.doc.release(child),
            (None, None) => {}
            (Some(child), Some(text)) => {
                CursorMut::new(&mut *self.doc, child).set_text(text)?;
            }
            (None, Some(text)) => {
                self.reborrow()
                    .insert_element(local_name, ns)?
                    .set_text(text)?;
            }
        }
        Ok(())
    }

    /// Sets the `xml:lang` attribute of the first matching child element.
    /// Nothing happens if there is no such child.
    pub fn set_child_lang(
        &mut self,
        local_name: &str,
        ns: Ns<'_>,
        lang: Option<&str>,
    ) -> Result<(), DocumentError> {
        if let Some(mut child) = self.child_mut(local_name, ns) {
            child.set_attribute("xml:lang", lang)?;
        }
        Ok(())
    }

    /// Appends a deep copy of an element from another document.
    pub fn append_copy(self, source: Cursor<'_>) -> Result<CursorMut<'a>, DocumentError> {
        self.check_tag(description::CDATA_CHILDREN)?;
        let Some(tag) = source.tag() else {
            return Err(DocumentError::BadXml(description::IMPORT_NOT_TAG));
        };
        let new = self
            .doc
            .alloc_node(NodePayload::Tag(Tag::new(&tag.name, None)))?;
        let declarations = self.doc.missing_declarations(Some(self.node), source);
        if let Err(err) = self.doc.copy_into(new, source) {
            self.doc.release(new);
            return Err(err);
        }
        self.doc.tag_mut(new).attributes.extend(declarations);
        self.doc.link_last(self.node, new);
        self.doc.resolve_namespaces(new);
        Ok(CursorMut::new(self.doc, new))
    }

    /// Puts a deep copy of an element from another document in place of
    /// this node. Replacing the root element replaces the whole tree.
    pub fn replace_with_copy(self, source: Cursor<'_>) -> Result<CursorMut<'a>, DocumentError> {
        let Some(tag) = source.tag() else {
            return Err(DocumentError::BadXml(description::IMPORT_NOT_TAG));
        };
        let parent = self.doc.node(self.node).parent;
        let new = self
            .doc
            .alloc_node(NodePayload::Tag(Tag::new(&tag.name, None)))?;
        let declarations = self.doc.missing_declarations(parent, source);
        if let Err(err) = self.doc.copy_into(new, source) {
            self.doc.release(new);
            return Err(err);
        }
        self.doc.tag_mut(new).attributes.extend(declarations);
        if parent.is_some() {
            self.doc.link_before(self.node, new);
        } else {
            self.doc.root = new;
        }
        self.doc.release(self.node);
        self.doc.resolve_namespaces(new);
        Ok(CursorMut::new(self.doc, new))
    }
}

impl std::fmt::Debug for CursorMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CursorMut ({})", self.node)
    }
}
