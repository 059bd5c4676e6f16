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
use crate::xmpp::Jid;
use crate::xmpp::XmlElement;
use crate::xmpp::XmppError;
use crate::xmpp::constants::PRESENCE_TAG;
use crate::xmpp::error::description;
use crate::xmpp::wire::WireTable;
use crate::xmpp::wire::from_wire;
use crate::xmpp::wire::to_wire;

const MIN_PRIORITY: i32 = -128;
const MAX_PRIORITY: i32 = 128;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum PresenceType {
    /// Written as the absence of the type attribute.
    #[default]
    Available,
    Unavailable,
    Subscribe,
    Subscribed,
    Unsubscribe,
    Unsubscribed,
    Probe,
    Error,
}

const PRESENCE_TYPES: &WireTable<PresenceType> = &[
    (PresenceType::Available, "available"),
    (PresenceType::Unavailable, "unavailable"),
    (PresenceType::Subscribe, "subscribe"),
    (PresenceType::Subscribed, "subscribed"),
    (PresenceType::Unsubscribe, "unsubscribe"),
    (PresenceType::Unsubscribed, "unsubscribed"),
    (PresenceType::Probe, "probe"),
    (PresenceType::Error, "error"),
];

impl PresenceType {
    pub fn as_str(self) -> &'static str {
        to_wire(PRESENCE_TYPES, self)
    }
}

impl FromStr for PresenceType {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_wire(PRESENCE_TYPES, "presence type", s)
    }
}

impl Display for PresenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Show {
    Chat,
    Away,
    Xa,
    Dnd,
}

const SHOWS: &WireTable<Show> = &[
    (Show::Chat, "chat"),
    (Show::Away, "away"),
    (Show::Xa, "xa"),
    (Show::Dnd, "dnd"),
];

impl Show {
    pub fn as_str(self) -> &'static str {
        to_wire(SHOWS, self)
    }
}

impl FromStr for Show {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_wire(SHOWS, "show", s)
    }
}

impl Display for Show {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A presence stanza.
#[derive(Clone, Debug)]
pub struct Presence {
    doc: Document,
}

impl Presence {
    pub fn new() -> Result<Presence, XmppError> {
        Ok(Presence {
            doc: Document::new(PRESENCE_TAG)?,
        })
    }

    pub fn with_type(presence_type: PresenceType) -> Result<Presence, XmppError> {
        let mut presence = Presence::new()?;
        presence.set_presence_type(presence_type)?;
        Ok(presence)
    }

    pub fn with_addresses(
        presence_type: PresenceType,
        from: Option<&Jid>,
        to: Option<&Jid>,
    ) -> Result<Presence, XmppError> {
        let mut presence = Presence::with_type(presence_type)?;
        presence.set_from(from)?;
        presence.set_to(to)?;
        Ok(presence)
    }

    /// Creates a presence from a copy of the element.
    pub fn from_element(element: Cursor<'_>) -> Result<Presence, XmppError> {
        Presence::from_document(DocumentFactory::global().import(element)?)
    }

    pub(crate) fn from_document(doc: Document) -> Result<Presence, XmppError> {
        check_root(&doc, PRESENCE_TAG)?;
        Ok(Presence { doc })
    }

    pub fn presence_type(&self) -> Result<PresenceType, XmppError> {
        match self.attribute("type") {
            Some(word) => word.parse(),
            None => Ok(PresenceType::Available),
        }
    }

    pub fn set_presence_type(&mut self, presence_type: PresenceType) -> Result<(), XmppError> {
        match presence_type {
            PresenceType::Available => self.set_attribute("type", None),
            other => self.set_attribute("type", Some(other.as_str())),
        }
    }

    pub fn show(&self) -> Result<Option<Show>, XmppError> {
        self.child_text("show", Ns::Default)
            .map(|word| word.parse())
            .transpose()
    }

    /// Sets the availability detail. Only available presences can have
    /// one, but it can always be removed.
    pub fn set_show(&mut self, show: Option<Show>) -> Result<(), XmppError> {
        if show.is_some() && self.presence_type()? != PresenceType::Available {
            return Err(XmppError::InvariantViolation(
                description::SHOW_NOT_AVAILABLE,
            ));
        }
        self.set_child_text("show", Ns::Default, show.map(Show::as_str))
    }

    pub fn status(&self) -> Option<String> {
        self.child_text("status", Ns::Default)
    }

    pub fn set_status(&mut self, status: Option<&str>) -> Result<(), XmppError> {
        self.set_child_text("status", Ns::Default, status)
    }

    /// Priority of the resource. Missing or unparsable values read as 0.
    pub fn priority(&self) -> i32 {
        self.child_text("priority", Ns::Default)
            .and_then(|text| text.parse().ok())
            .unwrap_or(0)
    }

    pub fn set_priority(&mut self, priority: i32) -> Result<(), XmppError> {
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
            return Err(XmppError::OutOfRange {
                field: "priority",
                value: i64::from(priority),
            });
        }
        self.set_child_text("priority", Ns::Default, Some(priority.to_string().as_str()))
    }
}

impl XmlElement for Presence {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

impl Packet for Presence {}

impl FromStr for Presence {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Presence::from_document(DocumentFactory::global().parse(s)?)
    }
}

impl Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.doc, f)
    }
}
