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
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use rand::Rng;

use super::Packet;
use super::check_root;
use crate::Cursor;
use crate::CursorMut;
use crate::Document;
use crate::DocumentFactory;
use crate::xmpp::Condition;
use crate::xmpp::PacketError;
use crate::xmpp::XmlElement;
use crate::xmpp::XmppError;
use crate::xmpp::constants::CLIENT_NS;
use crate::xmpp::constants::IQ_TAG;
use crate::xmpp::constants::SERVER_NS;
use crate::xmpp::error::description;
use crate::xmpp::wire::WireTable;
use crate::xmpp::wire::from_wire;
use crate::xmpp::wire::to_wire;

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn is_payload_namespace(namespace: Option<&str>) -> bool {
    matches!(namespace, Some(ns) if ns != CLIENT_NS && ns != SERVER_NS)
}

fn generate_id() -> String {
    let random: u32 = rand::rng().random_range(0..1000);
    let sequence = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{random}-{sequence}")
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum IqType {
    #[default]
    Get,
    Set,
    Result,
    Error,
}

const IQ_TYPES: &WireTable<IqType> = &[
    (IqType::Get, "get"),
    (IqType::Set, "set"),
    (IqType::Result, "result"),
    (IqType::Error, "error"),
];

impl IqType {
    pub fn as_str(self) -> &'static str {
        to_wire(IQ_TYPES, self)
    }
}

impl FromStr for IqType {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_wire(IQ_TYPES, "iq type", s)
    }
}

impl Display for IqType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An info/query stanza.
///
/// The payload of an IQ is its extended content: the first child element
/// in a namespace other than the stanza namespaces. Extensions of an IQ
/// live inside the extended content rather than next to it.
#[derive(Clone, Debug)]
pub struct Iq {
    doc: Document,
}

impl Iq {
    /// Creates a get request with a generated id.
    pub fn new() -> Result<Iq, XmppError> {
        Iq::with_type(IqType::Get)
    }

    pub fn with_type(iq_type: IqType) -> Result<Iq, XmppError> {
        Iq::with_id(iq_type, None)
    }

    /// Creates an IQ with the given id, or a generated one for None.
    pub fn with_id(iq_type: IqType, id: Option<&str>) -> Result<Iq, XmppError> {
        let mut iq = Iq {
            doc: Document::new(IQ_TAG)?,
        };
        iq.set_iq_type(Some(iq_type))?;
        match id {
            Some(id) => iq.set_id(Some(id))?,
            None => iq.set_id(Some(generate_id().as_str()))?,
        }
        Ok(iq)
    }

    /// Creates an IQ from a copy of the element.
    pub fn from_element(element: Cursor<'_>) -> Result<Iq, XmppError> {
        Iq::from_document(DocumentFactory::global().import(element)?)
    }

    pub(crate) fn from_document(doc: Document) -> Result<Iq, XmppError> {
        check_root(&doc, IQ_TAG)?;
        Ok(Iq { doc })
    }

    pub fn iq_type(&self) -> Result<Option<IqType>, XmppError> {
        self.attribute("type")
            .map(str::parse::<IqType>)
            .transpose()
    }

    pub fn set_iq_type(&mut self, iq_type: Option<IqType>) -> Result<(), XmppError> {
        self.set_attribute("type", iq_type.map(IqType::as_str))
    }

    pub fn is_request(&self) -> bool {
        matches!(self.iq_type(), Ok(Some(IqType::Get | IqType::Set)))
    }

    pub fn is_response(&self) -> bool {
        matches!(self.iq_type(), Ok(Some(IqType::Result | IqType::Error)))
    }

    /// First child element in a namespace other than the stanza ones.
    pub fn extended_content(&self) -> Option<Cursor<'_>> {
        self.doc
            .root()
            .elements()
            .find(|child| is_payload_namespace(child.namespace()))
    }

    pub fn extended_content_mut(&mut self) -> Option<CursorMut<'_>> {
        let id = self.extended_content()?.id()?;
        self.doc.cursor_mut(id).ok()
    }

    /// Puts a copy of the element in place of the extended content, or
    /// appends it if there is none yet.
    ///
    /// An element without a namespace takes the default namespace of the
    /// IQ, so it must end up outside the stanza namespaces either way.
    pub fn set_extended_content(
        &mut self,
        element: Cursor<'_>,
    ) -> Result<CursorMut<'_>, XmppError> {
        let namespace = element
            .namespace()
            .or_else(|| self.doc.root().lookup_namespace(None));
        if !is_payload_namespace(namespace) {
            return Err(XmppError::InvariantViolation(
                description::STANZA_NS_CONTENT,
            ));
        }
        let existing = self.extended_content().and_then(|child| child.id());
        let content = match existing {
            Some(id) => self.doc.cursor_mut(id)?.replace_with_copy(element)?,
            None => self.doc.root_mut().append_copy(element)?,
        };
        Ok(content)
    }

    /// Replaces the extended content with a new empty element.
    pub fn set_extended_content_element(
        &mut self,
        qualified_name: &str,
        namespace: &str,
    ) -> Result<CursorMut<'_>, XmppError> {
        let content = Document::with_namespace(qualified_name, Some(namespace))?;
        self.set_extended_content(content.root())
    }

    fn reply(&self, iq_type: IqType) -> Result<Iq, XmppError> {
        match self.iq_type()? {
            Some(IqType::Get | IqType::Set) => {}
            _ => {
                return Err(XmppError::InvariantViolation(
                    description::RESULT_FROM_RESPONSE,
                ));
            }
        }
        let mut reply = Iq::with_id(iq_type, self.id())?;
        reply.set_attribute("from", self.attribute("to"))?;
        reply.set_attribute("to", self.attribute("from"))?;
        Ok(reply)
    }

    /// Creates the result reply of a get or set request, with the same id
    /// and swapped addresses.
    pub fn create_result(&self) -> Result<Iq, XmppError> {
        self.reply(IqType::Result)
    }

    /// Creates the error reply of a get or set request. The reply carries
    /// a copy of the request payload and the error condition.
    pub fn create_error(&self, condition: Condition) -> Result<Iq, XmppError> {
        let mut reply = self.reply(IqType::Error)?;
        if let Some(content) = self.extended_content() {
            reply.set_extended_content(content)?;
        }
        reply.set_error(PacketError::new(condition)?)?;
        Ok(reply)
    }
}

impl XmlElement for Iq {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

impl Packet for Iq {
    fn extension_host(&self) -> Option<Cursor<'_>> {
        self.extended_content()
    }

    fn extension_host_mut(&mut self) -> Option<CursorMut<'_>> {
        self.extended_content_mut()
    }
}

impl FromStr for Iq {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Iq::from_document(DocumentFactory::global().parse(s)?)
    }
}

impl Display for Iq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.doc, f)
    }
}
