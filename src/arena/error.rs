/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::TryReserveError;

use thiserror::Error;

/// Error type for memory allocation failures.
///
/// Arena methods return this error when the slot vector cannot grow.
/// Best action is to abort the current operation and release any other
/// allocated resources.
///
/// Details about the failed allocation are not included to make
/// this error as lightweight as possible.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("not enough memory")]
pub struct NoMemory;

impl From<TryReserveError> for NoMemory {
    fn from(_: TryReserveError) -> Self {
        NoMemory
    }
}
