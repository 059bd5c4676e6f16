/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;
use std::str::FromStr;

use super::Packet;
use super::check_root;
use crate::Cursor;
use crate::Document;
use crate::DocumentFactory;
use crate::Ns;
use crate::xmpp::XmlElement;
use crate::xmpp::XmppError;
use crate::xmpp::constants::MESSAGE_TAG;
use crate::xmpp::wire::WireTable;
use crate::xmpp::wire::from_wire;
use crate::xmpp::wire::to_wire;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum MessageType {
    #[default]
    Normal,
    Chat,
    Groupchat,
    Headline,
    Error,
}

const MESSAGE_TYPES: &WireTable<MessageType> = &[
    (MessageType::Normal, "normal"),
    (MessageType::Chat, "chat"),
    (MessageType::Groupchat, "groupchat"),
    (MessageType::Headline, "headline"),
    (MessageType::Error, "error"),
];

impl MessageType {
    pub fn as_str(self) -> &'static str {
        to_wire(MESSAGE_TYPES, self)
    }
}

impl FromStr for MessageType {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_wire(MESSAGE_TYPES, "message type", s)
    }
}

impl Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message stanza.
#[derive(Clone, Debug)]
pub struct Message {
    doc: Document,
}

impl Message {
    pub fn new() -> Result<Message, XmppError> {
        Ok(Message {
            doc: Document::new(MESSAGE_TAG)?,
        })
    }

    /// Creates a message from a copy of the element.
    pub fn from_element(element: Cursor<'_>) -> Result<Message, XmppError> {
        Message::from_document(DocumentFactory::global().import(element)?)
    }

    pub(crate) fn from_document(doc: Document) -> Result<Message, XmppError> {
        check_root(&doc, MESSAGE_TAG)?;
        Ok(Message { doc })
    }

    /// Type of the message. A missing type attribute means normal.
    pub fn message_type(&self) -> Result<MessageType, XmppError> {
        match self.attribute("type") {
            Some(word) => word.parse(),
            None => Ok(MessageType::Normal),
        }
    }

    pub fn set_message_type(&mut self, message_type: Option<MessageType>) -> Result<(), XmppError> {
        self.set_attribute("type", message_type.map(MessageType::as_str))
    }

    pub fn subject(&self) -> Option<String> {
        self.child_text("subject", Ns::Default)
    }

    pub fn set_subject(&mut self, subject: Option<&str>) -> Result<(), XmppError> {
        self.set_child_text("subject", Ns::Default, subject)
    }

    pub fn body(&self) -> Option<String> {
        self.child_text("body", Ns::Default)
    }

    pub fn set_body(&mut self, body: Option<&str>) -> Result<(), XmppError> {
        self.set_child_text("body", Ns::Default, body)
    }

    pub fn thread(&self) -> Option<String> {
        self.child_text("thread", Ns::Default)
    }

    pub fn set_thread(&mut self, thread: Option<&str>) -> Result<(), XmppError> {
        self.set_child_text("thread", Ns::Default, thread)
    }
}

impl XmlElement for Message {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

impl Packet for Message {}

impl FromStr for Message {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Message::from_document(DocumentFactory::global().parse(s)?)
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.doc, f)
    }
}
