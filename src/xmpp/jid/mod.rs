/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use std::fmt::Display;
use std::hash::Hash;
use std::hash::Hasher;
use std::str::FromStr;

pub use error::BadJid;
use error::description;

const MAX_PART_SIZE: usize = 1023;

fn check_local(local: &str) -> Result<(), BadJid> {
    if local.is_empty() {
        return Err(BadJid(description::LOCAL_EMPTY));
    }
    if local.len() > MAX_PART_SIZE {
        return Err(BadJid(description::LOCAL_TOO_LONG));
    }
    Ok(())
}

// RFC 7622 section 3.2
fn strip_final_dot(domain: &str) -> &str {
    domain.strip_suffix('.').unwrap_or(domain)
}

fn check_domain(domain: &str) -> Result<(), BadJid> {
    if domain.is_empty() {
        return Err(BadJid(description::DOMAIN_EMPTY));
    }
    if domain.len() > MAX_PART_SIZE {
        return Err(BadJid(description::DOMAIN_TOO_LONG));
    }
    Ok(())
}

fn check_resource(resource: &str) -> Result<(), BadJid> {
    if resource.is_empty() {
        return Err(BadJid(description::RESOURCE_EMPTY));
    }
    if resource.len() > MAX_PART_SIZE {
        return Err(BadJid(description::RESOURCE_TOO_LONG));
    }
    Ok(())
}

struct JidParts<'a> {
    local: Option<&'a str>,
    domain: &'a str,
    resource: Option<&'a str>,
}

impl<'a> JidParts<'a> {
    fn new(jid: &'a str) -> Result<JidParts<'a>, BadJid> {
        let (bare, resource) = match jid.split_once('/') {
            Some((bare, resource)) => (bare, Some(resource)),
            None => (jid, None),
        };
        let (local, domain) = match bare.split_once('@') {
            Some((local, domain)) => (Some(local), domain),
            None => (None, bare),
        };
        let domain = strip_final_dot(domain);
        check_domain(domain)?;
        if let Some(local) = local {
            check_local(local)?;
        }
        if let Some(resource) = resource {
            check_resource(resource)?;
        }
        Ok(JidParts {
            local,
            domain,
            resource,
        })
    }
}

/// The address of an entity in the XMPP protocol.
///
/// Each JID has three parts:
/// - Local part: Optionally identifies a local entity on the domain.
/// - Domain part: Identifies an XMPP server.
/// - Resource part: Optionally identifies a service or an object.
///
/// Only the structure is checked, no stringprep normalization is done,
/// so comparisons are exact string comparisons.
///
/// More details can be found in [RFC7622](https://datatracker.ietf.org/doc/rfc7622/)
///
#[derive(Debug, Clone, Eq)]
pub struct Jid {
    full: String,
    at_pos: Option<usize>,
    slash_pos: Option<usize>,
}

impl Jid {
    /// Create a JID from a string.
    pub fn new(jid: &str) -> Result<Self, BadJid> {
        let parts = JidParts::new(jid)?;
        Ok(Jid::assemble(parts))
    }

    /// Create a JID from its separate parts.
    pub fn from_parts(
        local: Option<&str>,
        domain: &str,
        resource: Option<&str>,
    ) -> Result<Self, BadJid> {
        if let Some(local) = local {
            check_local(local)?;
            if local.contains(['@', '/']) {
                return Err(BadJid(description::LOCAL_INVALID));
            }
        }
        let domain = strip_final_dot(domain);
        check_domain(domain)?;
        if domain.contains(['@', '/']) {
            return Err(BadJid(description::DOMAIN_INVALID));
        }
        if let Some(resource) = resource {
            check_resource(resource)?;
        }
        Ok(Jid::assemble(JidParts {
            local,
            domain,
            resource,
        }))
    }

    fn assemble(parts: JidParts<'_>) -> Jid {
        let mut full_size = parts.domain.len();
        if let Some(local) = parts.local {
            full_size += local.len() + 1;
        }
        if let Some(resource) = parts.resource {
            full_size += resource.len() + 1;
        }
        let mut full = String::with_capacity(full_size);
        let mut at_pos = None;
        let mut slash_pos = None;
        if let Some(local) = parts.local {
            full.push_str(local);
            at_pos = Some(full.len());
            full.push('@');
        }
        full.push_str(parts.domain);
        if let Some(resource) = parts.resource {
            slash_pos = Some(full.len());
            full.push('/');
            full.push_str(resource);
        }
        Jid {
            full,
            at_pos,
            slash_pos,
        }
    }

    /// Full form of the JID with all the components.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Bare form of the JID without the resource part.
    pub fn bare(&self) -> &str {
        match self.slash_pos {
            Some(pos) => &self.full[..pos],
            None => &self.full,
        }
    }

    /// Only the local part of the JID.
    pub fn localpart(&self) -> Option<&str> {
        self.at_pos.map(|pos| &self.full[..pos])
    }

    /// Only the domain part of the JID.
    pub fn domainpart(&self) -> &str {
        let start = match self.at_pos {
            Some(pos) => pos + 1,
            None => 0,
        };
        let end = self.slash_pos.unwrap_or(self.full.len());
        &self.full[start..end]
    }

    /// Only the resource part of the JID.
    pub fn resourcepart(&self) -> Option<&str> {
        self.slash_pos.map(|pos| &self.full[pos + 1..])
    }

    /// True if the JID does not contain a resource part.
    pub fn is_bare(&self) -> bool {
        self.slash_pos.is_none()
    }

    /// Creates another JID without the resource part.
    pub fn to_bare(&self) -> Jid {
        Jid {
            full: self.bare().to_string(),
            at_pos: self.at_pos,
            slash_pos: None,
        }
    }

    /// Creates another JID by overriding the resource part.
    pub fn with_resource(self, resource: &str) -> Result<Jid, BadJid> {
        check_resource(resource)?;
        let slash_pos = self.bare().len();
        let mut full = String::with_capacity(slash_pos + 1 + resource.len());
        full.push_str(self.bare());
        full.push('/');
        full.push_str(resource);
        Ok(Jid {
            full,
            at_pos: self.at_pos,
            slash_pos: Some(slash_pos),
        })
    }
}

impl FromStr for Jid {
    type Err = BadJid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Jid::new(s)
    }
}

impl TryFrom<&str> for Jid {
    type Error = BadJid;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Jid::new(value)
    }
}

impl Display for Jid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

impl PartialEq for Jid {
    fn eq(&self, other: &Jid) -> bool {
        self.full == other.full
    }
}

impl PartialOrd for Jid {
    fn partial_cmp(&self, other: &Jid) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Jid {
    fn cmp(&self, other: &Jid) -> std::cmp::Ordering {
        self.full.cmp(&other.full)
    }
}

impl Hash for Jid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full.hash(state)
    }
}
