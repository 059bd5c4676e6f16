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
use super::constants::APP_ERRORS_NS;
use super::constants::ERROR_TAG;
use super::constants::STANZAS_NS;
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

/// How the sender of a failed stanza may proceed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorType {
    /// Do not retry, the error cannot be remedied.
    Cancel,
    /// Proceed, the condition was only a warning.
    Continue,
    /// Retry after changing the data sent.
    Modify,
    /// Retry after providing credentials.
    Auth,
    /// Retry after waiting, the error is temporary.
    Wait,
}

const ERROR_TYPES: &WireTable<ErrorType> = &[
    (ErrorType::Cancel, "cancel"),
    (ErrorType::Continue, "continue"),
    (ErrorType::Modify, "modify"),
    (ErrorType::Auth, "auth"),
    (ErrorType::Wait, "wait"),
];

impl ErrorType {
    pub fn as_str(self) -> &'static str {
        to_wire(ERROR_TYPES, self)
    }
}

impl FromStr for ErrorType {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_wire(ERROR_TYPES, "error type", s)
    }
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stanza error conditions.
///
/// Every condition has a legacy numeric code from the days before XMPP.
/// Several conditions share a code, and lookups by code return the
/// first one in declaration order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Condition {
    BadRequest,
    Conflict,
    FeatureNotImplemented,
    Forbidden,
    Gone,
    InternalServerError,
    ItemNotFound,
    JidMalformed,
    NotAcceptable,
    NotAllowed,
    NotAuthorized,
    PaymentRequired,
    RecipientUnavailable,
    Redirect,
    RegistrationRequired,
    RemoteServerNotFound,
    RemoteServerTimeout,
    ResourceConstraint,
    ServiceUnavailable,
    SubscriptionRequired,
    UndefinedCondition,
    UnexpectedRequest,
}

struct ConditionInfo {
    condition: Condition,
    name: &'static str,
    default_type: ErrorType,
    legacy_code: u32,
}

const fn info(
    condition: Condition,
    name: &'static str,
    default_type: ErrorType,
    legacy_code: u32,
) -> ConditionInfo {
    ConditionInfo {
        condition,
        name,
        default_type,
        legacy_code,
    }
}

// Indexed by the enum discriminant. Order also decides the legacy code
// lookups.
const CONDITIONS: &[ConditionInfo] = &[
    info(Condition::BadRequest, "bad-request", ErrorType::Modify, 400),
    info(Condition::Conflict, "conflict", ErrorType::Cancel, 409),
    info(
        Condition::FeatureNotImplemented,
        "feature-not-implemented",
        ErrorType::Cancel,
        501,
    ),
    info(Condition::Forbidden, "forbidden", ErrorType::Auth, 403),
    info(Condition::Gone, "gone", ErrorType::Modify, 302),
    info(
        Condition::InternalServerError,
        "internal-server-error",
        ErrorType::Wait,
        500,
    ),
    info(Condition::ItemNotFound, "item-not-found", ErrorType::Cancel, 404),
    info(Condition::JidMalformed, "jid-malformed", ErrorType::Modify, 400),
    info(Condition::NotAcceptable, "not-acceptable", ErrorType::Modify, 406),
    info(Condition::NotAllowed, "not-allowed", ErrorType::Cancel, 405),
    info(Condition::NotAuthorized, "not-authorized", ErrorType::Auth, 401),
    info(Condition::PaymentRequired, "payment-required", ErrorType::Auth, 402),
    info(
        Condition::RecipientUnavailable,
        "recipient-unavailable",
        ErrorType::Wait,
        404,
    ),
    info(Condition::Redirect, "redirect", ErrorType::Modify, 302),
    info(
        Condition::RegistrationRequired,
        "registration-required",
        ErrorType::Auth,
        407,
    ),
    info(
        Condition::RemoteServerNotFound,
        "remote-server-not-found",
        ErrorType::Cancel,
        404,
    ),
    info(
        Condition::RemoteServerTimeout,
        "remote-server-timeout",
        ErrorType::Wait,
        504,
    ),
    info(
        Condition::ResourceConstraint,
        "resource-constraint",
        ErrorType::Wait,
        500,
    ),
    info(
        Condition::ServiceUnavailable,
        "service-unavailable",
        ErrorType::Cancel,
        503,
    ),
    info(
        Condition::SubscriptionRequired,
        "subscription-required",
        ErrorType::Auth,
        407,
    ),
    info(
        Condition::UndefinedCondition,
        "undefined-condition",
        ErrorType::Wait,
        500,
    ),
    info(
        Condition::UnexpectedRequest,
        "unexpected-request",
        ErrorType::Wait,
        400,
    ),
];

impl Condition {
    fn info(self) -> &'static ConditionInfo {
        &CONDITIONS[self as usize]
    }

    /// Element name of the condition on the wire.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn default_type(self) -> ErrorType {
        self.info().default_type
    }

    pub fn legacy_code(self) -> u32 {
        self.info().legacy_code
    }

    /// Looks a condition up by name. Underscores are accepted in place
    /// of hyphens.
    pub fn from_name(name: &str) -> Result<Condition, XmppError> {
        let normalized = name.replace('_', "-");
        CONDITIONS
            .iter()
            .find(|info| info.name == normalized)
            .map(|info| info.condition)
            .ok_or_else(|| XmppError::UnknownCondition(name.to_string()))
    }

    /// Returns the first declared condition with the legacy code.
    pub fn from_legacy_code(code: u32) -> Result<Condition, XmppError> {
        CONDITIONS
            .iter()
            .find(|info| info.legacy_code == code)
            .map(|info| info.condition)
            .ok_or(XmppError::UnknownLegacyCode(code))
    }

    pub fn all() -> impl Iterator<Item = Condition> {
        CONDITIONS.iter().map(|info| info.condition)
    }
}

impl FromStr for Condition {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::from_name(s)
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn is_condition(child: &Cursor<'_>) -> bool {
    child.namespace() == Some(STANZAS_NS) && child.local_name() != TEXT_TAG
}

/// The error child of a stanza.
///
/// Conditions are written both as a namespaced child element and as the
/// legacy `code` attribute.
#[derive(Clone, Debug)]
pub struct PacketError {
    doc: Document,
}

impl PacketError {
    /// Creates an error with the default type of the condition.
    pub fn new(condition: Condition) -> Result<PacketError, XmppError> {
        PacketError::with_details(condition, condition.default_type(), None, None)
    }

    pub fn with_type(condition: Condition, error_type: ErrorType) -> Result<PacketError, XmppError> {
        PacketError::with_details(condition, error_type, None, None)
    }

    pub fn with_details(
        condition: Condition,
        error_type: ErrorType,
        text: Option<&str>,
        lang: Option<&str>,
    ) -> Result<PacketError, XmppError> {
        let mut error = PacketError {
            doc: Document::new(ERROR_TAG)?,
        };
        error.set_condition(condition)?;
        error.set_error_type(error_type)?;
        error.set_text_with_lang(text, lang)?;
        Ok(error)
    }

    /// Creates an error from a copy of the element.
    pub fn from_element(element: Cursor<'_>) -> Result<PacketError, XmppError> {
        Ok(PacketError {
            doc: DocumentFactory::global().import(element)?,
        })
    }

    pub fn error_type(&self) -> Result<Option<ErrorType>, XmppError> {
        self.attribute("type")
            .map(str::parse::<ErrorType>)
            .transpose()
    }

    pub fn set_error_type(&mut self, error_type: ErrorType) -> Result<(), XmppError> {
        self.set_attribute("type", Some(error_type.as_str()))
    }

    /// Reads the condition child, falling back to the legacy code when
    /// there is no such child.
    pub fn condition(&self) -> Result<Option<Condition>, XmppError> {
        if let Some(child) = self.element().elements().find(is_condition) {
            return Condition::from_name(child.local_name()).map(Some);
        }
        match self.attribute("code") {
            Some(code) => {
                let code: u32 = code
                    .trim()
                    .parse()
                    .map_err(|_| XmppError::invalid_value("error code", code))?;
                Condition::from_legacy_code(code).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Replaces the condition child and updates the legacy code.
    pub fn set_condition(&mut self, condition: Condition) -> Result<(), XmppError> {
        self.set_attribute("code", Some(condition.legacy_code().to_string().as_str()))?;
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
            .insert_tag_ns(condition.name(), STANZAS_NS)?;
        Ok(())
    }

    pub fn text(&self) -> Option<String> {
        self.child_text(TEXT_TAG, Ns::Uri(STANZAS_NS))
    }

    pub fn set_text(&mut self, text: Option<&str>) -> Result<(), XmppError> {
        self.set_child_text(TEXT_TAG, Ns::Uri(STANZAS_NS), text)
    }

    pub fn set_text_with_lang(
        &mut self,
        text: Option<&str>,
        lang: Option<&str>,
    ) -> Result<(), XmppError> {
        self.set_text(text)?;
        self.set_child_lang(TEXT_TAG, Ns::Uri(STANZAS_NS), lang)
    }

    pub fn text_lang(&self) -> Option<&str> {
        self.child_lang(TEXT_TAG, Ns::Uri(STANZAS_NS))
    }

    fn application_condition(&self) -> Option<Cursor<'_>> {
        self.element()
            .elements()
            .find(|child| child.namespace() != Some(STANZAS_NS))
    }

    pub fn application_condition_name(&self) -> Option<&str> {
        self.application_condition().map(|child| child.local_name())
    }

    pub fn application_condition_namespace(&self) -> Option<&str> {
        self.application_condition()
            .and_then(|child| child.namespace())
    }

    /// Replaces the application specific condition. Without a namespace
    /// the condition goes into the generic application errors namespace.
    pub fn set_application_condition(
        &mut self,
        name: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<(), XmppError> {
        if namespace == Some(STANZAS_NS) {
            return Err(XmppError::InvariantViolation(
                description::STANZAS_APP_CONDITION,
            ));
        }
        let previous: Vec<NodeId> = self
            .element()
            .elements()
            .filter(|child| child.namespace() != Some(STANZAS_NS))
            .filter_map(|child| child.id())
            .collect();
        for id in previous {
            self.doc.cursor_mut(id)?.remove();
        }
        if let Some(name) = name {
            self.element_mut()
                .insert_tag_ns(name, namespace.unwrap_or(APP_ERRORS_NS))?;
        }
        Ok(())
    }
}

impl XmlElement for PacketError {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

impl Display for PacketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.doc, f)
    }
}

#[cfg(test)]
mod tests;
