/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

//! Mapping between enumerations and their wire words.

use super::XmppError;

pub(crate) type WireTable<T> = [(T, &'static str)];

pub(crate) fn to_wire<T: Copy + PartialEq>(table: &WireTable<T>, value: T) -> &'static str {
    table
        .iter()
        .find(|(member, _)| *member == value)
        .map_or("", |(_, word)| word)
}

pub(crate) fn from_wire<T: Copy>(
    table: &WireTable<T>,
    field: &'static str,
    word: &str,
) -> Result<T, XmppError> {
    table
        .iter()
        .find(|(_, member_word)| *member_word == word)
        .map(|(member, _)| *member)
        .ok_or_else(|| XmppError::invalid_value(field, word))
}
