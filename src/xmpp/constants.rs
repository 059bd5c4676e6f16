/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub const CLIENT_NS: &str = "jabber:client";

pub const SERVER_NS: &str = "jabber:server";

pub const STREAM_NS: &str = "http://etherx.jabber.org/streams";

pub const STANZAS_NS: &str = "urn:ietf:params:xml:ns:xmpp-stanzas";

pub const STREAMS_NS: &str = "urn:ietf:params:xml:ns:xmpp-streams";

/// Default namespace of application specific error conditions.
pub const APP_ERRORS_NS: &str = "urn:xmpp:errors";

pub const ROSTER_NS: &str = "jabber:iq:roster";

pub const DATA_FORMS_NS: &str = "jabber:x:data";

pub const MUC_USER_NS: &str = "http://jabber.org/protocol/muc#user";

pub const MUC_OWNER_NS: &str = "http://jabber.org/protocol/muc#owner";

pub const MUC_ROOMCONFIG_FORM_TYPE: &str = "http://jabber.org/protocol/muc#roomconfig";

pub const MESSAGE_TAG: &str = "message";

pub const PRESENCE_TAG: &str = "presence";

pub const IQ_TAG: &str = "iq";

pub const ERROR_TAG: &str = "error";

pub const STREAM_ERROR_TAG: &str = "stream:error";
