/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use thiserror::Error;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Error)]
#[error("invalid JabberID: {0}")]
pub struct BadJid(pub &'static str);

pub(super) mod description {
    pub(in super::super) const DOMAIN_EMPTY: &str = "domainpart is empty";
    pub(in super::super) const DOMAIN_TOO_LONG: &str = "domainpart is longer than 1023 octets";
    pub(in super::super) const DOMAIN_INVALID: &str = "domainpart contains '@' or '/'";
    pub(in super::super) const LOCAL_EMPTY: &str = "localpart is empty";
    pub(in super::super) const LOCAL_TOO_LONG: &str = "localpart is longer than 1023 octets";
    pub(in super::super) const LOCAL_INVALID: &str = "localpart contains '@' or '/'";
    pub(in super::super) const RESOURCE_EMPTY: &str = "resourcepart is empty";
    pub(in super::super) const RESOURCE_TOO_LONG: &str = "resourcepart is longer than 1023 octets";
}
