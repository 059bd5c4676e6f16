/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;
use crate::xmpp::ErrorType;
use crate::xmpp::constants::ROSTER_NS;
use crate::xmpp::constants::STANZAS_NS;

fn jid(text: &str) -> Jid {
    Jid::new(text).unwrap()
}

#[test]
fn addresses() {
    let mut msg = Message::new().unwrap();
    assert_eq!(msg.to().unwrap(), None);
    assert_eq!(msg.from().unwrap(), None);

    msg.set_to(Some(&jid("juliet@example.com/balcony"))).unwrap();
    msg.set_from(Some(&jid("romeo@example.net"))).unwrap();
    assert_eq!(msg.to().unwrap(), Some(jid("juliet@example.com/balcony")));
    assert_eq!(msg.from().unwrap(), Some(jid("romeo@example.net")));
    assert_eq!(
        msg.to_xml(),
        "<message to=\"juliet@example.com/balcony\" from=\"romeo@example.net\"/>"
    );

    msg.set_to(None).unwrap();
    msg.set_from(None).unwrap();
    assert_eq!(msg.to().unwrap(), None);
    assert_eq!(msg.to_xml(), "<message/>");

    let msg: Message = "<message to='@bad'/>".parse().unwrap();
    assert!(matches!(msg.to(), Err(XmppError::BadJid(_))));
}

#[test]
fn ids() {
    let mut msg = Message::new().unwrap();
    assert_eq!(msg.id(), None);
    msg.set_id(Some("abc")).unwrap();
    assert_eq!(msg.id(), Some("abc"));
    msg.set_id(Some("")).unwrap();
    assert_eq!(msg.id(), None);
    msg.set_id(None).unwrap();
    assert_eq!(msg.to_xml(), "<message/>");
}

#[test]
fn message_children() {
    let mut msg = Message::new().unwrap();
    assert_eq!(msg.body(), None);
    msg.set_body(Some("hello")).unwrap();
    msg.set_body(Some("hi")).unwrap();
    msg.set_subject(Some("greeting")).unwrap();
    msg.set_thread(Some("t1")).unwrap();
    assert_eq!(msg.body().as_deref(), Some("hi"));
    assert_eq!(msg.subject().as_deref(), Some("greeting"));
    assert_eq!(msg.thread().as_deref(), Some("t1"));
    assert_eq!(msg.children("body", Ns::Default).count(), 1);
    assert_eq!(
        msg.to_xml(),
        "<message><body>hi</body><subject>greeting</subject><thread>t1</thread></message>"
    );

    msg.set_subject(None).unwrap();
    assert_eq!(msg.subject(), None);
    msg.set_body(Some("")).unwrap();
    assert_eq!(msg.body().as_deref(), Some(""));
    assert_eq!(msg.to_xml(), "<message><body/><thread>t1</thread></message>");
}

#[test]
fn message_type() {
    let mut msg = Message::new().unwrap();
    assert_eq!(msg.message_type().unwrap(), MessageType::Normal);
    msg.set_message_type(Some(MessageType::Groupchat)).unwrap();
    assert_eq!(msg.message_type().unwrap(), MessageType::Groupchat);
    assert_eq!(msg.attribute("type"), Some("groupchat"));
    msg.set_message_type(None).unwrap();
    assert_eq!(msg.attribute("type"), None);

    let msg: Message = "<message type='shout'/>".parse().unwrap();
    match msg.message_type() {
        Err(XmppError::InvalidEnumValue { value, .. }) => assert_eq!(value, "shout"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn wrong_root() {
    assert!(matches!(
        "<presence/>".parse::<Message>(),
        Err(XmppError::InvariantViolation(_))
    ));
    let doc = Document::from_str("<a><iq type='get'/></a>").unwrap();
    let iq = Iq::from_element(doc.root().first_tag()).unwrap();
    assert_eq!(iq.iq_type().unwrap(), Some(IqType::Get));
}

#[test]
fn presence_type_and_show() {
    let mut presence = Presence::new().unwrap();
    assert_eq!(presence.presence_type().unwrap(), PresenceType::Available);
    assert_eq!(presence.to_xml(), "<presence/>");

    presence.set_show(Some(Show::Away)).unwrap();
    assert_eq!(presence.show().unwrap(), Some(Show::Away));
    presence.set_show(Some(Show::Dnd)).unwrap();
    assert_eq!(presence.children("show", Ns::Default).count(), 1);
    assert_eq!(presence.show().unwrap(), Some(Show::Dnd));

    presence.set_presence_type(PresenceType::Unavailable).unwrap();
    assert_eq!(presence.attribute("type"), Some("unavailable"));
    assert!(matches!(
        presence.set_show(Some(Show::Chat)),
        Err(XmppError::InvariantViolation(_))
    ));
    presence.set_show(None).unwrap();
    assert_eq!(presence.show().unwrap(), None);

    presence.set_presence_type(PresenceType::Available).unwrap();
    assert_eq!(presence.attribute("type"), None);

    let presence: Presence = "<presence type='available'/>".parse().unwrap();
    assert_eq!(presence.presence_type().unwrap(), PresenceType::Available);
}

#[test]
fn presence_status_and_priority() {
    let mut presence = Presence::with_addresses(
        PresenceType::Subscribe,
        Some(&jid("romeo@example.net")),
        None,
    )
    .unwrap();
    assert_eq!(presence.presence_type().unwrap(), PresenceType::Subscribe);
    assert_eq!(presence.from().unwrap(), Some(jid("romeo@example.net")));

    presence.set_status(Some("busy")).unwrap();
    presence.set_status(Some("gone fishing")).unwrap();
    assert_eq!(presence.status().as_deref(), Some("gone fishing"));
    assert_eq!(presence.children("status", Ns::Default).count(), 1);

    assert_eq!(presence.priority(), 0);
    presence.set_priority(-128).unwrap();
    assert_eq!(presence.priority(), -128);
    presence.set_priority(128).unwrap();
    assert_eq!(presence.priority(), 128);
    assert_eq!(
        presence.set_priority(129),
        Err(XmppError::OutOfRange {
            field: "priority",
            value: 129
        })
    );
    assert!(presence.set_priority(-129).is_err());
    assert_eq!(presence.priority(), 128);

    let presence: Presence = "<presence><priority>high</priority></presence>"
        .parse()
        .unwrap();
    assert_eq!(presence.priority(), 0);
}

#[test]
fn iq_ids() {
    let first = Iq::new().unwrap();
    let second = Iq::new().unwrap();
    assert_eq!(first.iq_type().unwrap(), Some(IqType::Get));
    assert!(first.id().is_some());
    assert_ne!(first.id(), second.id());

    let iq = Iq::with_id(IqType::Set, Some("s1")).unwrap();
    assert_eq!(iq.id(), Some("s1"));
    assert!(iq.is_request());
    assert!(!iq.is_response());

    let iq: Iq = "<iq/>".parse().unwrap();
    assert_eq!(iq.iq_type().unwrap(), None);
    assert!(!iq.is_request());
    assert!(!iq.is_response());
}

#[test]
fn iq_result() {
    let request: Iq =
        "<iq type='get' id='r1' from='juliet@example.com/balcony' to='example.com'>\
         <query xmlns='jabber:iq:roster'/></iq>"
            .parse()
            .unwrap();
    let result = request.create_result().unwrap();
    assert_eq!(result.iq_type().unwrap(), Some(IqType::Result));
    assert_eq!(result.id(), Some("r1"));
    assert_eq!(result.to().unwrap(), Some(jid("juliet@example.com/balcony")));
    assert_eq!(result.from().unwrap(), Some(jid("example.com")));
    assert!(result.extended_content().is_none());

    assert!(matches!(
        result.create_result(),
        Err(XmppError::InvariantViolation(_))
    ));
    assert!(result.create_error(Condition::BadRequest).is_err());

    let unknown: Iq = "<iq type='bogus' id='1'/>".parse().unwrap();
    assert!(matches!(
        unknown.create_result(),
        Err(XmppError::InvalidEnumValue { field: "iq type", .. })
    ));
    assert!(matches!(
        unknown.create_error(Condition::BadRequest),
        Err(XmppError::InvalidEnumValue { .. })
    ));
}

#[test]
fn iq_error() {
    let request: Iq = "<iq type='set' id='e1' from='a@b'><query xmlns='jabber:iq:roster'/></iq>"
        .parse()
        .unwrap();
    let reply = request.create_error(Condition::ItemNotFound).unwrap();
    assert_eq!(reply.iq_type().unwrap(), Some(IqType::Error));
    assert_eq!(reply.id(), Some("e1"));
    assert_eq!(reply.to().unwrap(), Some(jid("a@b")));
    let content = reply.extended_content().unwrap();
    assert_eq!(content.local_name(), "query");
    assert_eq!(content.namespace(), Some(ROSTER_NS));

    let error = reply.error().unwrap().unwrap();
    assert_eq!(error.condition().unwrap(), Some(Condition::ItemNotFound));
    assert_eq!(error.error_type().unwrap(), Some(ErrorType::Cancel));
    assert_eq!(error.attribute("code"), Some("404"));
}

#[test]
fn extended_content() {
    let mut iq = Iq::with_type(IqType::Set).unwrap();
    assert!(iq.extended_content().is_none());

    iq.set_extended_content_element("query", ROSTER_NS).unwrap();
    assert_eq!(iq.extended_content().unwrap().namespace(), Some(ROSTER_NS));

    let other = Document::from_str("<vCard xmlns='vcard-temp'><FN>Juliet</FN></vCard>").unwrap();
    iq.set_extended_content(other.root()).unwrap();
    let content = iq.extended_content().unwrap();
    assert_eq!(content.local_name(), "vCard");
    assert_eq!(content.child_text("FN", Ns::Default).as_deref(), Some("Juliet"));
    assert_eq!(iq.element().elements().count(), 1);

    let mut content = iq.extended_content_mut().unwrap();
    content.set_attribute("x", Some("1")).unwrap();
    assert_eq!(iq.extended_content().unwrap().attribute("x"), Some("1"));
}

#[test]
fn extended_content_needs_payload_namespace() {
    let mut iq = Iq::with_type(IqType::Set).unwrap();
    let plain = Document::new("query").unwrap();
    let client = Document::with_namespace("query", Some("jabber:client")).unwrap();
    for _ in 0..2 {
        assert!(matches!(
            iq.set_extended_content(plain.root()),
            Err(XmppError::InvariantViolation(_))
        ));
        assert!(matches!(
            iq.set_extended_content(client.root()),
            Err(XmppError::InvariantViolation(_))
        ));
    }
    assert_eq!(iq.element().elements().count(), 0);

    let mut iq: Iq = "<iq xmlns='jabber:server' type='get'/>".parse().unwrap();
    assert!(iq.set_extended_content(plain.root()).is_err());

    let roster = Document::with_namespace("query", Some(ROSTER_NS)).unwrap();
    iq.set_extended_content(roster.root()).unwrap();
    iq.set_extended_content(roster.root()).unwrap();
    assert_eq!(iq.element().elements().count(), 1);
    assert_eq!(iq.extended_content().unwrap().namespace(), Some(ROSTER_NS));
}

#[test]
fn prefixed_stanza_children() {
    let mut msg: Message =
        "<cli:message xmlns:cli='jabber:client'><cli:body>hi</cli:body></cli:message>"
            .parse()
            .unwrap();
    assert_eq!(msg.body().as_deref(), Some("hi"));

    msg.set_body(Some("new")).unwrap();
    assert_eq!(msg.children("body", Ns::Default).count(), 1);
    assert_eq!(
        msg.to_xml(),
        "<cli:message xmlns:cli=\"jabber:client\"><cli:body>new</cli:body></cli:message>"
    );

    msg.set_body(None).unwrap();
    assert_eq!(msg.to_xml(), "<cli:message xmlns:cli=\"jabber:client\"/>");
}

#[test]
fn stanza_namespace_is_not_content() {
    let iq: Iq = "<iq xmlns='jabber:client' type='error'><error type='cancel'/></iq>"
        .parse()
        .unwrap();
    assert!(iq.extended_content().is_none());
}

#[test]
fn errors() {
    let mut msg = Message::new().unwrap();
    msg.set_message_type(Some(MessageType::Chat)).unwrap();
    assert!(msg.error().unwrap().is_none());

    msg.set_error_condition(Condition::Forbidden).unwrap();
    assert_eq!(msg.message_type().unwrap(), MessageType::Error);
    let error = msg.error().unwrap().unwrap();
    assert_eq!(error.condition().unwrap(), Some(Condition::Forbidden));
    assert_eq!(error.error_type().unwrap(), Some(ErrorType::Auth));

    let error = PacketError::with_details(
        Condition::Conflict,
        ErrorType::Cancel,
        Some("taken"),
        Some("en"),
    )
    .unwrap();
    msg.set_error(error).unwrap();
    assert_eq!(msg.children(ERROR_TAG, Ns::Default).count(), 1);
    let error = msg.error().unwrap().unwrap();
    assert_eq!(error.condition().unwrap(), Some(Condition::Conflict));
    assert_eq!(error.text().as_deref(), Some("taken"));
    assert_eq!(error.text_lang(), Some("en"));
    assert_eq!(
        msg.element()
            .find_element(ERROR_TAG, Ns::Default)
            .find_element("conflict", Ns::Any)
            .namespace(),
        Some(STANZAS_NS)
    );
}

#[test]
fn extensions() {
    let mut msg = Message::new().unwrap();
    let ext = Document::from_str("<x xmlns='jabber:x:oob'><url>http://example.com</url></x>")
        .unwrap();
    msg.add_extension(crate::xmpp::PacketExtension::from_element(ext.root()).unwrap())
        .unwrap();

    let found = msg.extension("x", "jabber:x:oob").unwrap();
    assert_eq!(found.name(), "x");
    assert_eq!(found.namespace(), Some("jabber:x:oob"));
    assert!(msg.extension("x", "jabber:x:other").is_none());

    assert!(msg.delete_extension("x", "jabber:x:oob"));
    assert!(!msg.delete_extension("x", "jabber:x:oob"));
    assert!(msg.extension("x", "jabber:x:oob").is_none());
}

#[test]
fn iq_extensions() {
    let mut iq = Iq::with_type(IqType::Get).unwrap();
    let ext = crate::xmpp::PacketExtension::new("x", "jabber:x:oob").unwrap();
    assert!(matches!(
        iq.add_extension(ext.clone()),
        Err(XmppError::InvariantViolation(_))
    ));
    assert!(iq.extension("x", "jabber:x:oob").is_none());
    assert!(!iq.delete_extension("x", "jabber:x:oob"));

    iq.set_extended_content_element("query", "jabber:iq:private")
        .unwrap();
    iq.add_extension(ext).unwrap();
    let query = iq.extended_content().unwrap();
    assert_eq!(
        query.find_element("x", Ns::Uri("jabber:x:oob")).namespace(),
        Some("jabber:x:oob")
    );
    assert!(iq.extension("x", "jabber:x:oob").is_some());
}

#[test]
fn clones_are_independent() {
    let mut msg = Message::new().unwrap();
    msg.set_body(Some("original")).unwrap();
    let copy = msg.clone();
    msg.set_body(Some("changed")).unwrap();
    assert_eq!(copy.body().as_deref(), Some("original"));
    assert_eq!(msg.body().as_deref(), Some("changed"));

    let mut copy = msg.clone();
    copy.set_body(None).unwrap();
    copy.set_thread(Some("t1")).unwrap();
    assert_eq!(msg.body().as_deref(), Some("changed"));
    assert_eq!(msg.thread(), None);
    assert_eq!(copy.body(), None);
    assert_eq!(copy.thread().as_deref(), Some("t1"));
}

#[test]
fn stanza_dispatch() {
    let text = "<message xmlns=\"jabber:client\" type=\"chat\"><body>hi</body></message>";
    let stanza: Stanza = text.parse().unwrap();
    assert_eq!(stanza.kind(), "message");
    assert_eq!(stanza.to_string(), text);
    match &stanza {
        Stanza::Message(msg) => assert_eq!(msg.body().as_deref(), Some("hi")),
        other => panic!("unexpected {other:?}"),
    }

    let stanza: Stanza = "<presence/>".parse().unwrap();
    assert_eq!(stanza.kind(), "presence");
    let stanza: Stanza = "<iq type='result' id='1'/>".parse().unwrap();
    assert_eq!(stanza.kind(), "iq");
    assert_eq!(stanza.id(), Some("1"));

    assert!(matches!(
        "<stream/>".parse::<Stanza>(),
        Err(XmppError::InvariantViolation(_))
    ));
    assert!(matches!(
        "<message".parse::<Stanza>(),
        Err(XmppError::Document(_))
    ));
}
