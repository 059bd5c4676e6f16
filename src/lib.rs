/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Typed object model for XMPP stanzas.
//!
//! Every stanza owns a [Document], an XML tree stored in its own arena.
//! The [xmpp] module layers messages, presences, IQs, errors, rosters
//! and data forms on top of it.
//!
//! ```
//! use tinder::xmpp::{Jid, Message, MessageType, Packet};
//!
//! let mut msg = Message::new().unwrap();
//! msg.set_to(Some(&Jid::new("juliet@example.com").unwrap())).unwrap();
//! msg.set_message_type(Some(MessageType::Chat)).unwrap();
//! msg.set_body(Some("Wherefore art thou?")).unwrap();
//! assert_eq!(
//!     msg.to_string(),
//!     "<message to=\"juliet@example.com\" type=\"chat\"><body>Wherefore art thou?</body></message>"
//! );
//! ```

mod arena;
mod document;
mod entities;
pub mod xmpp;

pub use arena::ArenaStats;
pub use arena::NoMemory;
pub use arena::NodeId;

pub use document::Attributes;
pub use document::Children;
pub use document::Cursor;
pub use document::CursorMut;
pub use document::DescendantOrSelf;
pub use document::Document;
pub use document::DocumentError;
pub use document::DocumentFactory;
pub use document::FactoryConfig;
pub use document::Ns;
pub use document::XML_NS;
