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

use super::DataForm;
use super::FieldType;
use super::FormField;
use super::FormType;
use super::Iq;
use super::IqType;
use super::Jid;
use super::Message;
use super::Packet;
use super::XmlElement;
use super::XmppError;
use super::constants::DATA_FORMS_NS;
use super::constants::MUC_OWNER_NS;
use super::constants::MUC_ROOMCONFIG_FORM_TYPE;
use super::constants::MUC_USER_NS;
use crate::Cursor;
use crate::CursorMut;
use crate::Document;
use crate::Ns;

const X_TAG: &str = "x";
const INVITE_TAG: &str = "invite";
const REASON_TAG: &str = "reason";
const QUERY_TAG: &str = "query";
const FORM_TYPE_VAR: &str = "FORM_TYPE";

/// A mediated invitation to a multi-user chat room. The message is
/// sent to the room, which forwards it to the invitee.
#[derive(Clone, Debug)]
pub struct Invitation {
    message: Message,
}

impl Invitation {
    pub fn new(invitee: &Jid, reason: Option<&str>) -> Result<Invitation, XmppError> {
        let mut message = Message::new()?;
        let x = message
            .element_mut()
            .insert_tag_ns(X_TAG, MUC_USER_NS)?;
        let mut invite = x.insert_tag(INVITE_TAG)?;
        invite.set_attribute("to", Some(invitee.full()))?;
        if let Some(reason) = reason.filter(|reason| !reason.is_empty()) {
            invite.insert_tag(REASON_TAG)?.set_text(reason)?;
        }
        Ok(Invitation { message })
    }

    fn invite(&self) -> Cursor<'_> {
        self.message
            .element()
            .find_element(X_TAG, Ns::Uri(MUC_USER_NS))
            .find_element(INVITE_TAG, Ns::Default)
    }

    pub fn invitee(&self) -> Result<Option<Jid>, XmppError> {
        match self.invite().attribute("to") {
            Some(to) => Ok(Some(Jid::new(to)?)),
            None => Ok(None),
        }
    }

    pub fn reason(&self) -> Option<String> {
        self.invite().child_text(REASON_TAG, Ns::Default)
    }

    pub fn as_message(&self) -> &Message {
        &self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }
}

impl XmlElement for Invitation {
    fn document(&self) -> &Document {
        self.message.document()
    }

    fn document_mut(&mut self) -> &mut Document {
        self.message.document_mut()
    }
}

impl Packet for Invitation {}

impl Display for Invitation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.message, f)
    }
}

/// A room owner request which submits the configuration form of a
/// multi-user chat room.
///
/// ```
/// use tinder::xmpp::RoomConfiguration;
///
/// let config = RoomConfiguration::new([
///     ("muc#roomconfig_roomname", vec!["Balcony"]),
///     ("muc#roomconfig_roomowners", vec!["juliet@example.com", "romeo@example.net"]),
/// ])
/// .unwrap();
/// let form = config.form().unwrap().unwrap();
/// assert_eq!(form.field_values("muc#roomconfig_roomname"), vec!["Balcony"]);
/// ```
#[derive(Clone, Debug)]
pub struct RoomConfiguration {
    iq: Iq,
}

impl RoomConfiguration {
    /// Creates the request from field names and their values. The form
    /// type field is added first.
    pub fn new<I, K, V, S>(field_values: I) -> Result<RoomConfiguration, XmppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut form = DataForm::new(FormType::Submit)?;
        let mut form_type = FormField::with_type(FORM_TYPE_VAR, FieldType::Hidden)?;
        form_type.add_value(MUC_ROOMCONFIG_FORM_TYPE)?;
        form.add_field(form_type)?;
        for (var, values) in field_values {
            let mut field = FormField::new(var.as_ref())?;
            for value in values {
                field.add_value(value.as_ref())?;
            }
            form.add_field(field)?;
        }
        let mut iq = Iq::with_type(IqType::Set)?;
        iq.set_extended_content_element(QUERY_TAG, MUC_OWNER_NS)?
            .append_copy(form.element())?;
        Ok(RoomConfiguration { iq })
    }

    /// Copy of the submitted form.
    pub fn form(&self) -> Result<Option<DataForm>, XmppError> {
        let form = self
            .iq
            .element()
            .find_element(QUERY_TAG, Ns::Uri(MUC_OWNER_NS))
            .find_element(X_TAG, Ns::Uri(DATA_FORMS_NS));
        if form.is_null() {
            return Ok(None);
        }
        DataForm::from_element(form).map(Some)
    }

    pub fn as_iq(&self) -> &Iq {
        &self.iq
    }

    pub fn into_iq(self) -> Iq {
        self.iq
    }
}

impl XmlElement for RoomConfiguration {
    fn document(&self) -> &Document {
        self.iq.document()
    }

    fn document_mut(&mut self) -> &mut Document {
        self.iq.document_mut()
    }
}

impl Packet for RoomConfiguration {
    fn extension_host(&self) -> Option<Cursor<'_>> {
        self.iq.extension_host()
    }

    fn extension_host_mut(&mut self) -> Option<CursorMut<'_>> {
        self.iq.extension_host_mut()
    }
}

impl Display for RoomConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.iq, f)
    }
}

#[cfg(test)]
mod tests;
