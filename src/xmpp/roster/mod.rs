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

use super::Iq;
use super::IqType;
use super::Jid;
use super::Packet;
use super::XmlElement;
use super::XmppError;
use super::constants::ROSTER_NS;
use super::error::description;
use super::wire::WireTable;
use super::wire::from_wire;
use super::wire::to_wire;
use crate::Cursor;
use crate::CursorMut;
use crate::Document;
use crate::NodeId;
use crate::Ns;

const QUERY_TAG: &str = "query";
const ITEM_TAG: &str = "item";
const GROUP_TAG: &str = "group";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Subscription {
    None,
    To,
    From,
    Both,
    /// Only used in requests to delete an item.
    Remove,
}

const SUBSCRIPTIONS: &WireTable<Subscription> = &[
    (Subscription::None, "none"),
    (Subscription::To, "to"),
    (Subscription::From, "from"),
    (Subscription::Both, "both"),
    (Subscription::Remove, "remove"),
];

impl Subscription {
    pub fn as_str(self) -> &'static str {
        to_wire(SUBSCRIPTIONS, self)
    }
}

impl FromStr for Subscription {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_wire(SUBSCRIPTIONS, "subscription", s)
    }
}

/// Pending subscription request of a roster item.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Ask {
    Subscribe,
    Unsubscribe,
}

const ASKS: &WireTable<Ask> = &[(Ask::Subscribe, "subscribe"), (Ask::Unsubscribe, "unsubscribe")];

impl Ask {
    pub fn as_str(self) -> &'static str {
        to_wire(ASKS, self)
    }
}

impl FromStr for Ask {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_wire(ASKS, "ask", s)
    }
}

/// A contact in a roster. Items are values read from the roster tree,
/// changing them does not change the roster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RosterItem {
    jid: Jid,
    name: Option<String>,
    ask: Option<Ask>,
    subscription: Option<Subscription>,
    groups: Vec<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

impl RosterItem {
    fn from_element(item: Cursor<'_>) -> Result<RosterItem, XmppError> {
        Ok(RosterItem {
            jid: Jid::new(item.attribute("jid").unwrap_or_default())?,
            name: non_empty(item.attribute("name")).map(str::to_string),
            ask: non_empty(item.attribute("ask"))
                .map(str::parse::<Ask>)
                .transpose()?,
            subscription: non_empty(item.attribute("subscription"))
                .map(str::parse::<Subscription>)
                .transpose()?,
            groups: item
                .elements_named(GROUP_TAG, Ns::Default)
                .map(|group| group.text())
                .collect(),
        })
    }

    pub fn jid(&self) -> &Jid {
        &self.jid
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ask(&self) -> Option<Ask> {
        self.ask
    }

    pub fn subscription(&self) -> Option<Subscription> {
        self.subscription
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

/// A roster IQ in the `jabber:iq:roster` namespace.
///
/// Items are keyed by the bare address. Adding an item with an address
/// which is already in the roster updates that item in place.
#[derive(Clone, Debug)]
pub struct Roster {
    iq: Iq,
}

impl Roster {
    /// Creates a roster request.
    pub fn new() -> Result<Roster, XmppError> {
        Roster::with_type(IqType::Get)
    }

    pub fn with_type(iq_type: IqType) -> Result<Roster, XmppError> {
        let mut iq = Iq::with_type(iq_type)?;
        iq.set_extended_content_element(QUERY_TAG, ROSTER_NS)?;
        Ok(Roster { iq })
    }

    /// Creates a roster from a copy of the element.
    pub fn from_element(element: Cursor<'_>) -> Result<Roster, XmppError> {
        Ok(Roster {
            iq: Iq::from_element(element)?,
        })
    }

    pub fn from_iq(iq: Iq) -> Roster {
        Roster { iq }
    }

    pub fn as_iq(&self) -> &Iq {
        &self.iq
    }

    pub fn as_iq_mut(&mut self) -> &mut Iq {
        &mut self.iq
    }

    pub fn into_iq(self) -> Iq {
        self.iq
    }

    fn query(&self) -> Cursor<'_> {
        self.iq
            .element()
            .find_element(QUERY_TAG, Ns::Uri(ROSTER_NS))
    }

    fn item_id(&self, bare: &str) -> Option<NodeId> {
        self.query()
            .elements_named(ITEM_TAG, Ns::Default)
            .find(|item| item.attribute("jid") == Some(bare))
            .and_then(|item| item.id())
    }

    fn item_mut(&mut self, bare: &str) -> Result<CursorMut<'_>, XmppError> {
        if let Some(id) = self.item_id(bare) {
            return Ok(self.iq.document_mut().cursor_mut(id)?);
        }
        let query = match self.query().id() {
            Some(id) => self.iq.document_mut().cursor_mut(id)?,
            None => self
                .iq
                .element_mut()
                .insert_tag_ns(QUERY_TAG, ROSTER_NS)?,
        };
        let mut item = query.insert_tag(ITEM_TAG)?;
        item.set_attribute("jid", Some(bare))?;
        Ok(item)
    }

    /// Adds an item or updates the item with the same bare address.
    ///
    /// Name, ask and subscription are overwritten, None removing them.
    /// The groups of the item are replaced by the given ones.
    pub fn upsert_item(
        &mut self,
        jid: &Jid,
        name: Option<&str>,
        ask: Option<Ask>,
        subscription: Option<Subscription>,
        groups: &[&str],
    ) -> Result<RosterItem, XmppError> {
        if !matches!(self.iq.iq_type()?, Some(IqType::Result | IqType::Set)) {
            return Err(XmppError::InvariantViolation(description::ROSTER_ITEM_TYPE));
        }
        let mut item = self.item_mut(jid.bare())?;
        item.set_attribute("name", name)?;
        item.set_attribute("ask", ask.map(Ask::as_str))?;
        item.set_attribute("subscription", subscription.map(Subscription::as_str))?;
        item.remove_children(GROUP_TAG, Ns::Default);
        for group in groups {
            item.reborrow().insert_tag(GROUP_TAG)?.set_text(group)?;
        }
        Ok(RosterItem {
            jid: jid.to_bare(),
            name: name.map(str::to_string),
            ask,
            subscription,
            groups: groups.iter().map(|group| group.to_string()).collect(),
        })
    }

    pub fn add_item(
        &mut self,
        jid: &Jid,
        subscription: Subscription,
    ) -> Result<RosterItem, XmppError> {
        self.upsert_item(jid, None, None, Some(subscription), &[])
    }

    /// Removes the item with the bare address of the jid. Returns true
    /// if there was one.
    pub fn remove_item(&mut self, jid: &Jid) -> Result<bool, XmppError> {
        match self.item_id(jid.bare()) {
            Some(id) => {
                self.iq.document_mut().cursor_mut(id)?.remove();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Reads the items from the tree.
    pub fn items(&self) -> Result<Vec<RosterItem>, XmppError> {
        self.query()
            .elements_named(ITEM_TAG, Ns::Default)
            .map(RosterItem::from_element)
            .collect()
    }
}

impl XmlElement for Roster {
    fn document(&self) -> &Document {
        self.iq.document()
    }

    fn document_mut(&mut self) -> &mut Document {
        self.iq.document_mut()
    }
}

impl Packet for Roster {
    fn extension_host(&self) -> Option<Cursor<'_>> {
        self.iq.extension_host()
    }

    fn extension_host_mut(&mut self) -> Option<CursorMut<'_>> {
        self.iq.extension_host_mut()
    }
}

impl From<Roster> for Iq {
    fn from(roster: Roster) -> Iq {
        roster.iq
    }
}

impl FromStr for Roster {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Roster { iq: s.parse()? })
    }
}

impl Display for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.iq, f)
    }
}
