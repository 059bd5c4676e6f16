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

use super::jid::BadJid;
use crate::DocumentError;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum XmppError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("invalid value '{value}' for {field}")]
    InvalidEnumValue { field: &'static str, value: String },
    #[error("unknown error condition: {0}")]
    UnknownCondition(String),
    #[error("unknown legacy error code: {0}")]
    UnknownLegacyCode(u32),
    #[error("cannot construct extension {name} ({namespace}): {reason}")]
    ExtensionConstruction {
        name: String,
        namespace: String,
        reason: String,
    },
    #[error("invalid operation: {0}")]
    InvariantViolation(&'static str),
    #[error("{field} value {value} is out of range")]
    OutOfRange { field: &'static str, value: i64 },
    #[error(transparent)]
    BadJid(#[from] BadJid),
}

impl XmppError {
    pub(crate) fn invalid_value(field: &'static str, value: &str) -> XmppError {
        XmppError::InvalidEnumValue {
            field,
            value: value.to_string(),
        }
    }
}

pub(crate) mod description {
    pub(crate) const SHOW_NOT_AVAILABLE: &str = "show can only be set on available presence";
    pub(crate) const RESULT_FROM_RESPONSE: &str = "only get or set requests can be answered";
    pub(crate) const NO_EXTENDED_CONTENT: &str = "IQ has no child element to host extensions";
    pub(crate) const STANZA_NS_CONTENT: &str =
        "IQ payload must be in a namespace other than the stanza namespaces";
    pub(crate) const ROSTER_ITEM_TYPE: &str = "roster items can be added to result or set only";
    pub(crate) const STANZAS_APP_CONDITION: &str =
        "application conditions cannot use the stanza error namespace";
    pub(crate) const NOT_A_STANZA: &str = "element is not a message, presence or iq";
    pub(crate) const WRONG_ELEMENT: &str = "element has a different name than expected";
    pub(crate) const REGISTRY_INSTALLED: &str = "global extension registry is already installed";
}
