/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod registry;

use std::any::Any;
use std::fmt::Debug;
use std::fmt::Display;

pub use registry::ExtensionFactory;
pub use registry::ExtensionRegistry;

use super::DataForm;
use super::XmlElement;
use super::XmppError;
use crate::Cursor;
use crate::Document;
use crate::DocumentFactory;

/// A namespaced child element of a packet with no dedicated type.
#[derive(Clone, Debug)]
pub struct PacketExtension {
    doc: Document,
}

impl PacketExtension {
    /// Creates an empty extension element declaring its namespace.
    pub fn new(qualified_name: &str, namespace: &str) -> Result<PacketExtension, XmppError> {
        Ok(PacketExtension {
            doc: Document::with_namespace(qualified_name, Some(namespace))?,
        })
    }

    /// Creates an extension from a copy of the element.
    pub fn from_element(element: Cursor<'_>) -> Result<PacketExtension, XmppError> {
        Ok(PacketExtension {
            doc: DocumentFactory::global().import(element)?,
        })
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn name(&self) -> &str {
        self.element().local_name()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.element().namespace()
    }
}

impl XmlElement for PacketExtension {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

impl Display for PacketExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.doc, f)
    }
}

/// Application defined extension types which can be produced by a
/// registered factory.
pub trait TypedExtension: XmlElement + Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// An extension found in a packet.
#[derive(Debug)]
pub enum Extension {
    /// No factory is registered for the element.
    Generic(PacketExtension),
    Form(DataForm),
    Typed(Box<dyn TypedExtension>),
}

impl Extension {
    pub fn element(&self) -> Cursor<'_> {
        match self {
            Extension::Generic(extension) => extension.element(),
            Extension::Form(form) => form.element(),
            Extension::Typed(extension) => extension.element(),
        }
    }

    pub fn name(&self) -> &str {
        self.element().local_name()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.element().namespace()
    }

    pub fn as_form(&self) -> Option<&DataForm> {
        match self {
            Extension::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn as_generic(&self) -> Option<&PacketExtension> {
        match self {
            Extension::Generic(extension) => Some(extension),
            _ => None,
        }
    }

    /// Returns the typed extension if it is of type T.
    pub fn downcast_ref<T: TypedExtension>(&self) -> Option<&T> {
        match self {
            Extension::Typed(extension) => extension.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.element(), f)
    }
}

#[cfg(test)]
mod tests;
