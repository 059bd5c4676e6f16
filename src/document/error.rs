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

use crate::arena::NoMemory;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DocumentError {
    #[error("not enough memory")]
    NoMemory,
    #[error("invalid XML syntax: {0}")]
    BadXml(&'static str),
    #[error("malformed XML: {0}")]
    Syntax(String),
    #[error("node handle belongs to another document")]
    ForeignNode,
    #[error("invalid markup factory configuration: {0}")]
    Configuration(&'static str),
}

impl From<NoMemory> for DocumentError {
    fn from(_: NoMemory) -> Self {
        DocumentError::NoMemory
    }
}

impl From<quick_xml::Error> for DocumentError {
    fn from(err: quick_xml::Error) -> Self {
        DocumentError::Syntax(err.to_string())
    }
}

impl From<std::str::Utf8Error> for DocumentError {
    fn from(_: std::str::Utf8Error) -> Self {
        DocumentError::BadXml(description::INVALID_UTF8)
    }
}

pub(super) mod description {
    pub(in super::super) const EMPTY_NAME: &str = "tag name cannot be empty";
    pub(in super::super) const UNBOUND_PREFIX: &str = "tag name prefix is not bound to a namespace";
    pub(in super::super) const DUPLICATE_ATTRIBUTE: &str =
        "attribute name already used in this tag";
    pub(in super::super) const MALFORMED_ATTRIBUTE: &str = "malformed attribute";
    pub(in super::super) const CDATA_ATTRIBUTE: &str = "attributes cannot be set on CDATA elements";
    pub(in super::super) const CDATA_CHILDREN: &str =
        "child elements cannot be added on CDATA elements";
    pub(in super::super) const IMPORT_NOT_TAG: &str = "only tags can be imported";
    pub(in super::super) const INVALID_UTF8: &str = "text is not valid UTF-8";
    pub(in super::super) const NO_DOCUMENT: &str = "no root element found";
    pub(in super::super) const MULTIPLE_ROOTS: &str = "document has more than one root element";
    pub(in super::super) const TEXT_OUTSIDE_ROOT: &str = "character data outside of root element";
    pub(in super::super) const UNCLOSED_TAGS: &str = "document ended with open tags";
    pub(in super::super) const TOO_DEEP: &str = "element nesting is deeper than allowed";
    pub(in super::super) const ZERO_DEPTH: &str = "maximum depth must be at least one";
    pub(in super::super) const ALREADY_INSTALLED: &str =
        "global factory is already installed or in use";
}
