/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Typed XMPP stanzas and the elements they carry.

pub mod constants;
mod element;
mod error;
mod extension;
mod forms;
mod jid;
mod muc;
mod packet;
mod packet_error;
mod roster;
mod stream_error;
mod wire;

pub use element::XmlElement;
pub use error::XmppError;
pub use extension::Extension;
pub use extension::ExtensionFactory;
pub use extension::ExtensionRegistry;
pub use extension::PacketExtension;
pub use extension::TypedExtension;
pub use forms::DataForm;
pub use forms::FieldOption;
pub use forms::FieldType;
pub use forms::FormField;
pub use forms::FormType;
pub use forms::FormValue;
pub use jid::BadJid;
pub use jid::Jid;
pub use muc::Invitation;
pub use muc::RoomConfiguration;
pub use packet::Iq;
pub use packet::IqType;
pub use packet::Message;
pub use packet::MessageType;
pub use packet::Packet;
pub use packet::Presence;
pub use packet::PresenceType;
pub use packet::Show;
pub use packet::Stanza;
pub use packet_error::Condition;
pub use packet_error::ErrorType;
pub use packet_error::PacketError;
pub use roster::Ask;
pub use roster::Roster;
pub use roster::RosterItem;
pub use roster::Subscription;
pub use stream_error::StreamCondition;
pub use stream_error::StreamError;

#[cfg(test)]
mod tests;
