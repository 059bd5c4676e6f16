/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::thread;

use super::*;
use crate::Ns;

fn check_send_sync<T: Send + Sync>() {}

#[test]
fn thread_safety() {
    check_send_sync::<Message>();
    check_send_sync::<Presence>();
    check_send_sync::<Iq>();
    check_send_sync::<Stanza>();
    check_send_sync::<PacketError>();
    check_send_sync::<StreamError>();
    check_send_sync::<Roster>();
    check_send_sync::<DataForm>();
    check_send_sync::<Extension>();
    check_send_sync::<ExtensionRegistry>();
}

#[test]
fn move_between_threads() {
    let mut msg = Message::new().unwrap();
    msg.set_body(Some("ping")).unwrap();
    let copy = msg.clone();
    let handle = thread::spawn(move || {
        msg.set_body(Some("pong")).unwrap();
        msg
    });
    let msg = handle.join().unwrap();
    assert_eq!(msg.body().as_deref(), Some("pong"));
    assert_eq!(copy.body().as_deref(), Some("ping"));
}

#[test]
fn request_reply_flow() {
    let request: Stanza = "<iq xmlns='jabber:client' type='get' id='v1' \
        from='romeo@montague.net/orchard' to='capulet.com'>\
        <query xmlns='jabber:iq:version'/></iq>"
        .parse()
        .unwrap();
    let Stanza::Iq(request) = request else {
        panic!("expected an iq");
    };
    let mut reply = request.create_result().unwrap();
    let mut query = reply
        .set_extended_content(request.extended_content().unwrap())
        .unwrap();
    query
        .set_child_text("name", Ns::Default, Some("tinder"))
        .unwrap();
    assert_eq!(
        reply.to_xml(),
        "<iq type=\"result\" id=\"v1\" from=\"capulet.com\" to=\"romeo@montague.net/orchard\">\
         <query xmlns=\"jabber:iq:version\"><name>tinder</name></query></iq>"
    );

    let failure = request.create_error(Condition::ServiceUnavailable).unwrap();
    let reparsed: Iq = failure.to_xml().parse().unwrap();
    let error = reparsed.error().unwrap().unwrap();
    assert_eq!(error.condition().unwrap(), Some(Condition::ServiceUnavailable));
    assert_eq!(error.error_type().unwrap(), Some(ErrorType::Cancel));
    assert_eq!(
        reparsed.extended_content().unwrap().namespace(),
        Some("jabber:iq:version")
    );
}
