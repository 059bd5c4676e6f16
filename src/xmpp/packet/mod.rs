/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod iq;
mod message;
mod presence;

use std::fmt::Display;
use std::str::FromStr;

pub use iq::Iq;
pub use iq::IqType;
pub use message::Message;
pub use message::MessageType;
pub use presence::Presence;
pub use presence::PresenceType;
pub use presence::Show;

use super::Condition;
use super::Extension;
use super::ExtensionRegistry;
use super::Jid;
use super::PacketError;
use super::XmlElement;
use super::XmppError;
use super::constants::ERROR_TAG;
use super::constants::IQ_TAG;
use super::constants::MESSAGE_TAG;
use super::constants::PRESENCE_TAG;
use super::error::description;
use crate::Cursor;
use crate::CursorMut;
use crate::Document;
use crate::DocumentFactory;
use crate::Ns;

fn address(text: Option<&str>) -> Result<Option<Jid>, XmppError> {
    match text {
        Some(text) => Ok(Some(Jid::new(text)?)),
        None => Ok(None),
    }
}

fn check_root(doc: &Document, name: &str) -> Result<(), XmppError> {
    if doc.root().local_name() != name {
        return Err(XmppError::InvariantViolation(description::WRONG_ELEMENT));
    }
    Ok(())
}

/// Common behavior of the addressed XMPP stanzas.
///
/// Addresses are parsed from the attribute text on every read. Absent
/// attributes read as None, and setting None removes the attribute.
pub trait Packet: XmlElement {
    fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    fn set_id(&mut self, id: Option<&str>) -> Result<(), XmppError> {
        self.set_attribute("id", id)
    }

    fn from(&self) -> Result<Option<Jid>, XmppError> {
        address(self.attribute("from"))
    }

    fn set_from(&mut self, from: Option<&Jid>) -> Result<(), XmppError> {
        self.set_attribute("from", from.map(Jid::full))
    }

    fn to(&self) -> Result<Option<Jid>, XmppError> {
        address(self.attribute("to"))
    }

    fn set_to(&mut self, to: Option<&Jid>) -> Result<(), XmppError> {
        self.set_attribute("to", to.map(Jid::full))
    }

    /// Copy of the error child, if there is one.
    fn error(&self) -> Result<Option<PacketError>, XmppError> {
        match self.first_child(ERROR_TAG, Ns::Default) {
            Some(error) => Ok(Some(PacketError::from_element(error)?)),
            None => Ok(None),
        }
    }

    /// Replaces the error child and changes the packet type to error.
    fn set_error(&mut self, error: PacketError) -> Result<(), XmppError> {
        self.set_attribute("type", Some("error"))?;
        let mut root = self.element_mut();
        root.remove_children(ERROR_TAG, Ns::Default);
        root.append_copy(error.element())?;
        Ok(())
    }

    fn set_error_condition(&mut self, condition: Condition) -> Result<(), XmppError> {
        self.set_error(PacketError::new(condition)?)
    }

    /// Element which holds the extensions of the packet.
    fn extension_host(&self) -> Option<Cursor<'_>> {
        Some(self.element())
    }

    fn extension_host_mut(&mut self) -> Option<CursorMut<'_>> {
        Some(self.element_mut())
    }

    /// Attaches a copy of the extension element. The extension value is
    /// consumed, so the same element cannot end up in two packets.
    fn add_extension<E: XmlElement>(&mut self, extension: E) -> Result<(), XmppError> {
        let Some(host) = self.extension_host_mut() else {
            return Err(XmppError::InvariantViolation(
                description::NO_EXTENDED_CONTENT,
            ));
        };
        host.append_copy(extension.element())?;
        Ok(())
    }

    /// Looks the extension up through the global registry.
    fn extension(&self, name: &str, namespace: &str) -> Option<Extension> {
        self.extension_with(ExtensionRegistry::global(), name, namespace)
    }

    fn extension_with(
        &self,
        registry: &ExtensionRegistry,
        name: &str,
        namespace: &str,
    ) -> Option<Extension> {
        registry.extension_for(self.extension_host()?, name, namespace)
    }

    /// Removes the first child with the name and namespace, whether or
    /// not it was attached as an extension. Returns true if one was found.
    fn delete_extension(&mut self, name: &str, namespace: &str) -> bool {
        let Some(host) = self.extension_host_mut() else {
            return false;
        };
        match host.find_element(name, Ns::Uri(namespace)) {
            Some(child) => {
                child.remove();
                true
            }
            None => false,
        }
    }
}

/// Any of the three stanza kinds.
#[derive(Clone, Debug)]
pub enum Stanza {
    Message(Message),
    Presence(Presence),
    Iq(Iq),
}

impl Stanza {
    /// Wraps a document according to the name of its root element.
    pub fn from_document(doc: Document) -> Result<Stanza, XmppError> {
        let name = doc.root().local_name().to_string();
        match name.as_str() {
            MESSAGE_TAG => Ok(Stanza::Message(Message::from_document(doc)?)),
            PRESENCE_TAG => Ok(Stanza::Presence(Presence::from_document(doc)?)),
            IQ_TAG => Ok(Stanza::Iq(Iq::from_document(doc)?)),
            _ => Err(XmppError::InvariantViolation(description::NOT_A_STANZA)),
        }
    }

    pub fn from_element(element: Cursor<'_>) -> Result<Stanza, XmppError> {
        Stanza::from_document(DocumentFactory::global().import(element)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Stanza::Message(_) => MESSAGE_TAG,
            Stanza::Presence(_) => PRESENCE_TAG,
            Stanza::Iq(_) => IQ_TAG,
        }
    }
}

impl XmlElement for Stanza {
    fn document(&self) -> &Document {
        match self {
            Stanza::Message(message) => message.document(),
            Stanza::Presence(presence) => presence.document(),
            Stanza::Iq(iq) => iq.document(),
        }
    }

    fn document_mut(&mut self) -> &mut Document {
        match self {
            Stanza::Message(message) => message.document_mut(),
            Stanza::Presence(presence) => presence.document_mut(),
            Stanza::Iq(iq) => iq.document_mut(),
        }
    }
}

impl Packet for Stanza {
    fn extension_host(&self) -> Option<Cursor<'_>> {
        match self {
            Stanza::Iq(iq) => iq.extension_host(),
            _ => Some(self.element()),
        }
    }

    fn extension_host_mut(&mut self) -> Option<CursorMut<'_>> {
        match self {
            Stanza::Iq(iq) => iq.extension_host_mut(),
            _ => Some(self.element_mut()),
        }
    }
}

impl FromStr for Stanza {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stanza::from_document(DocumentFactory::global().parse(s)?)
    }
}

impl Display for Stanza {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.document(), f)
    }
}

#[cfg(test)]
mod tests;
