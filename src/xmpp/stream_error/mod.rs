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

use super::XmlElement;
use super::XmppError;
use super::constants::STREAM_ERROR_TAG;
use super::constants::STREAM_NS;
use super::constants::STREAMS_NS;
use super::error::description;
use super::wire::WireTable;
use super::wire::from_wire;
use super::wire::to_wire;
use crate::Cursor;
use crate::Document;
use crate::DocumentFactory;
use crate::NodeId;
use crate::Ns;

const TEXT_TAG: &str = "text";

/// Conditions which end an XML stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StreamCondition {
    BadFormat,
    BadNamespacePrefix,
    Conflict,
    ConnectionTimeout,
    HostGone,
    HostUnknown,
    ImproperAddressing,
    InternalServerError,
    InvalidFrom,
    InvalidId,
    InvalidNamespace,
    InvalidXml,
    NotAuthorized,
    PolicyViolation,
    RemoteConnectionFailed,
    ResourceConstraint,
    RestrictedXml,
    SeeOtherHost,
    SystemShutdown,
    UndefinedCondition,
    UnsupportedEncoding,
    UnsupportedStanzaType,
    UnsupportedVersion,
    XmlNotWellFormed,
}

const STREAM_CONDITIONS: &WireTable<StreamCondition> = &[
    (StreamCondition::BadFormat, "bad-format"),
    (StreamCondition::BadNamespacePrefix, "bad-namespace-prefix"),
    (StreamCondition::Conflict, "conflict"),
    (StreamCondition::ConnectionTimeout, "connection-timeout"),
    (StreamCondition::HostGone, "host-gone"),
    (StreamCondition::HostUnknown, "host-unknown"),
    (StreamCondition::ImproperAddressing, "improper-addressing"),
    (StreamCondition::InternalServerError, "internal-server-error"),
    (StreamCondition::InvalidFrom, "invalid-from"),
    (StreamCondition::InvalidId, "invalid-id"),
    (StreamCondition::InvalidNamespace, "invalid-namespace"),
    (StreamCondition::InvalidXml, "invalid-xml"),
    (StreamCondition::NotAuthorized, "not-authorized"),
    (StreamCondition::PolicyViolation, "policy-violation"),
    (StreamCondition::RemoteConnectionFailed, "remote-connection-failed"),
    (StreamCondition::ResourceConstraint, "resource-constraint"),
    (StreamCondition::RestrictedXml, "restricted-xml"),
    (StreamCondition::SeeOtherHost, "see-other-host"),
    (StreamCondition::SystemShutdown, "system-shutdown"),
    (StreamCondition::UndefinedCondition, "undefined-condition"),
    (StreamCondition::UnsupportedEncoding, "unsupported-encoding"),
    (StreamCondition::UnsupportedStanzaType, "unsupported-stanza-type"),
    (StreamCondition::UnsupportedVersion, "unsupported-version"),
    (StreamCondition::XmlNotWellFormed, "xml-not-well-formed"),
];

impl StreamCondition {
    pub fn name(self) -> &'static str {
        to_wire(STREAM_CONDITIONS, self)
    }

    /// Looks a condition up by name. Underscores are accepted in place
    /// of hyphens.
    pub fn from_name(name: &str) -> Result<StreamCondition, XmppError> {
        from_wire(STREAM_CONDITIONS, "stream condition", &name.replace('_', "-"))
            .map_err(|_| XmppError::UnknownCondition(name.to_string()))
    }

    pub fn all() -> impl Iterator<Item = StreamCondition> {
        STREAM_CONDITIONS.iter().map(|(condition, _)| *condition)
    }
}

impl FromStr for StreamCondition {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StreamCondition::from_name(s)
    }
}

impl Display for StreamCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn is_condition(child: &Cursor<'_>) -> bool {
    child.namespace() == Some(STREAMS_NS) && child.local_name() != TEXT_TAG
}

/// The `stream:error` element which closes a stream.
#[derive(Clone, Debug)]
pub struct StreamError {
    doc: Document,
}

impl StreamError {
    pub fn new(condition: StreamCondition) -> Result<StreamError, XmppError> {
        let mut error = StreamError {
            doc: Document::with_namespace(STREAM_ERROR_TAG, Some(STREAM_NS))?,
        };
        error.set_condition(condition)?;
        Ok(error)
    }

    pub fn with_text(
        condition: StreamCondition,
        text: &str,
        lang: Option<&str>,
    ) -> Result<StreamError, XmppError> {
        let mut error = StreamError::new(condition)?;
        error.set_text_with_lang(Some(text), lang)?;
        Ok(error)
    }

    /// Creates a stream error from a copy of the element.
    pub fn from_element(element: Cursor<'_>) -> Result<StreamError, XmppError> {
        let doc = DocumentFactory::global().import(element)?;
        let root = doc.root();
        if root.local_name() != "error" || root.namespace() != Some(STREAM_NS) {
            return Err(XmppError::InvariantViolation(description::WRONG_ELEMENT));
        }
        Ok(StreamError { doc })
    }

    /// Stream errors have no legacy codes, so the condition is only read
    /// from the child element.
    pub fn condition(&self) -> Result<Option<StreamCondition>, XmppError> {
        self.element()
            .elements()
            .find(is_condition)
            .map(|child| StreamCondition::from_name(child.local_name()))
            .transpose()
    }

    pub fn set_condition(&mut self, condition: StreamCondition) -> Result<(), XmppError> {
        let previous: Vec<NodeId> = self
            .element()
            .elements()
            .filter(is_condition)
            .filter_map(|child| child.id())
            .collect();
        for id in previous {
            self.doc.cursor_mut(id)?.remove();
        }
        self.element_mut()
            .insert_tag_ns(condition.name(), STREAMS_NS)?;
        Ok(())
    }

    pub fn text(&self) -> Option<String> {
        self.child_text(TEXT_TAG, Ns::Uri(STREAMS_NS))
    }

    pub fn text_lang(&self) -> Option<&str> {
        self.child_lang(TEXT_TAG, Ns::Uri(STREAMS_NS))
    }

    pub fn set_text(&mut self, text: Option<&str>) -> Result<(), XmppError> {
        self.set_child_text(TEXT_TAG, Ns::Uri(STREAMS_NS), text)
    }

    pub fn set_text_with_lang(
        &mut self,
        text: Option<&str>,
        lang: Option<&str>,
    ) -> Result<(), XmppError> {
        self.set_text(text)?;
        self.set_child_lang(TEXT_TAG, Ns::Uri(STREAMS_NS), lang)
    }
}

impl XmlElement for StreamError {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

impl FromStr for StreamError {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let doc = DocumentFactory::global().parse(s)?;
        StreamError::from_element(doc.root())
    }
}

impl Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.doc, f)
    }
}

#[cfg(test)]
mod tests;
