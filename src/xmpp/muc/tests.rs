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
fn invitation() {
    let invitee = Jid::new("hecate@shakespeare.lit").unwrap();
    let mut invitation = Invitation::new(&invitee, Some("Hey Hecate, this is the place for all good witches!")).unwrap();
    invitation
        .set_to(Some(&Jid::new("darkcave@chat.shakespeare.lit").unwrap()))
        .unwrap();
    assert_eq!(invitation.invitee().unwrap(), Some(invitee));
    assert_eq!(
        invitation.reason().as_deref(),
        Some("Hey Hecate, this is the place for all good witches!")
    );
    assert_eq!(
        invitation.to_xml(),
        "<message to=\"darkcave@chat.shakespeare.lit\">\
         <x xmlns=\"http://jabber.org/protocol/muc#user\">\
         <invite to=\"hecate@shakespeare.lit\">\
         <reason>Hey Hecate, this is the place for all good witches!</reason>\
         </invite></x></message>"
    );
    let x = invitation.element().first_tag();
    assert_eq!(x.first_tag().namespace(), Some(MUC_USER_NS));
    assert_eq!(x.first_tag().first_tag().namespace(), Some(MUC_USER_NS));
}

#[test]
fn invitation_without_reason() {
    let invitee = Jid::new("hecate@shakespeare.lit").unwrap();
    for reason in [None, Some("")] {
        let invitation = Invitation::new(&invitee, reason).unwrap();
        assert_eq!(invitation.reason(), None);
        assert!(
            invitation
                .as_message()
                .to_xml()
                .ends_with("<invite to=\"hecate@shakespeare.lit\"/></x></message>")
        );
    }
    let message = Invitation::new(&invitee, None).unwrap().into_message();
    assert!(message.extension("x", MUC_USER_NS).is_some());
}

#[test]
fn room_configuration() {
    let config = RoomConfiguration::new([
        ("muc#roomconfig_roomname", vec!["A Dark Cave"]),
        ("muc#roomconfig_whois", vec!["moderators"]),
        ("muc#roomconfig_roomadmins", vec!["wiccarocks@shakespeare.lit", "hecate@shakespeare.lit"]),
    ])
    .unwrap();
    let iq = config.as_iq();
    assert_eq!(iq.iq_type().unwrap(), Some(IqType::Set));
    assert!(iq.id().is_some());
    assert_eq!(iq.extended_content().unwrap().namespace(), Some(MUC_OWNER_NS));

    let form = config.form().unwrap().unwrap();
    assert_eq!(form.form_type().unwrap(), Some(FormType::Submit));
    let fields = form.fields().unwrap();
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0].var(), Some("FORM_TYPE"));
    assert_eq!(fields[0].field_type().unwrap(), Some(FieldType::Hidden));
    assert_eq!(fields[0].values(), vec![MUC_ROOMCONFIG_FORM_TYPE]);
    assert_eq!(fields[1].var(), Some("muc#roomconfig_roomname"));
    assert_eq!(
        form.field_values("muc#roomconfig_roomadmins"),
        vec!["wiccarocks@shakespeare.lit", "hecate@shakespeare.lit"]
    );

    let found = config.extension("x", DATA_FORMS_NS).unwrap();
    assert_eq!(
        found.as_form().unwrap().field_values("muc#roomconfig_whois"),
        vec!["moderators"]
    );
}

#[test]
fn empty_room_configuration() {
    let config = RoomConfiguration::new(Vec::<(&str, Vec<&str>)>::new()).unwrap();
    let form = config.form().unwrap().unwrap();
    assert_eq!(form.fields().unwrap().len(), 1);
    assert!(config.into_iq().is_request());
}
