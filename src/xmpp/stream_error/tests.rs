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

#[test]
fn conditions() {
    assert_eq!(StreamCondition::all().count(), 24);
    for condition in StreamCondition::all() {
        assert_eq!(
            condition.name().parse::<StreamCondition>().unwrap(),
            condition
        );
    }
    assert_eq!(
        StreamCondition::from_name("see_other_host").unwrap(),
        StreamCondition::SeeOtherHost
    );
    assert_eq!(StreamCondition::XmlNotWellFormed.to_string(), "xml-not-well-formed");
    assert_eq!(
        StreamCondition::from_name("bad-request"),
        Err(XmppError::UnknownCondition("bad-request".to_string()))
    );
}

#[test]
fn new_error() {
    let error = StreamError::new(StreamCondition::Conflict).unwrap();
    assert_eq!(
        error.to_xml(),
        "<stream:error xmlns:stream=\"http://etherx.jabber.org/streams\">\
         <conflict xmlns=\"urn:ietf:params:xml:ns:xmpp-streams\"/></stream:error>"
    );
    assert_eq!(error.element().local_name(), "error");
    assert_eq!(error.element().namespace(), Some(STREAM_NS));
    assert_eq!(error.condition().unwrap(), Some(StreamCondition::Conflict));
    assert_eq!(error.text(), None);
}

#[test]
fn change_condition_and_text() {
    let mut error =
        StreamError::with_text(StreamCondition::HostUnknown, "no such host", Some("en")).unwrap();
    assert_eq!(error.text().as_deref(), Some("no such host"));
    assert_eq!(error.text_lang(), Some("en"));

    error.set_condition(StreamCondition::SystemShutdown).unwrap();
    assert_eq!(error.condition().unwrap(), Some(StreamCondition::SystemShutdown));
    assert_eq!(error.element().elements().count(), 2);
    assert_eq!(error.text().as_deref(), Some("no such host"));

    error.set_text(None).unwrap();
    assert_eq!(error.text(), None);
    assert_eq!(error.element().elements().count(), 1);
}

#[test]
fn parsed_error() {
    let error: StreamError = "<stream:error xmlns:stream='http://etherx.jabber.org/streams'>\
        <text xmlns='urn:ietf:params:xml:ns:xmpp-streams'>bye</text>\
        <policy-violation xmlns='urn:ietf:params:xml:ns:xmpp-streams'/>\
        </stream:error>"
        .parse()
        .unwrap();
    assert_eq!(error.condition().unwrap(), Some(StreamCondition::PolicyViolation));
    assert_eq!(error.text().as_deref(), Some("bye"));

    let error: StreamError = "<stream:error xmlns:stream='http://etherx.jabber.org/streams'>\
        <on-fire xmlns='urn:ietf:params:xml:ns:xmpp-streams'/></stream:error>"
        .parse()
        .unwrap();
    assert!(matches!(
        error.condition(),
        Err(XmppError::UnknownCondition(_))
    ));

    assert!(matches!(
        "<error/>".parse::<StreamError>(),
        Err(XmppError::InvariantViolation(_))
    ));
}
