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
fn condition_table() {
    assert_eq!(Condition::all().count(), 22);
    for condition in Condition::all() {
        assert_eq!(Condition::from_name(condition.name()).unwrap(), condition);
        assert_eq!(condition.to_string(), condition.name());
    }
    assert_eq!(Condition::BadRequest.name(), "bad-request");
    assert_eq!(Condition::BadRequest.default_type(), ErrorType::Modify);
    assert_eq!(Condition::BadRequest.legacy_code(), 400);
    assert_eq!(Condition::Forbidden.default_type(), ErrorType::Auth);
    assert_eq!(Condition::RemoteServerTimeout.legacy_code(), 504);
    assert_eq!(Condition::UnexpectedRequest.default_type(), ErrorType::Wait);
}

#[test]
fn condition_names() {
    assert_eq!(
        Condition::from_name("item_not_found").unwrap(),
        Condition::ItemNotFound
    );
    assert_eq!(
        "service-unavailable".parse::<Condition>().unwrap(),
        Condition::ServiceUnavailable
    );
    assert_eq!(
        Condition::from_name("on-fire"),
        Err(XmppError::UnknownCondition("on-fire".to_string()))
    );
}

#[test]
fn legacy_codes() {
    assert_eq!(Condition::from_legacy_code(400).unwrap(), Condition::BadRequest);
    assert_eq!(Condition::from_legacy_code(404).unwrap(), Condition::ItemNotFound);
    assert_eq!(Condition::from_legacy_code(302).unwrap(), Condition::Gone);
    assert_eq!(
        Condition::from_legacy_code(500).unwrap(),
        Condition::InternalServerError
    );
    assert_eq!(
        Condition::from_legacy_code(407).unwrap(),
        Condition::RegistrationRequired
    );
    assert_eq!(
        Condition::from_legacy_code(418),
        Err(XmppError::UnknownLegacyCode(418))
    );
}

#[test]
fn error_types() {
    assert_eq!("continue".parse::<ErrorType>().unwrap(), ErrorType::Continue);
    assert_eq!(ErrorType::Wait.to_string(), "wait");
    assert!("later".parse::<ErrorType>().is_err());
}

#[test]
fn new_error() {
    let error = PacketError::new(Condition::BadRequest).unwrap();
    assert_eq!(
        error.to_xml(),
        "<error code=\"400\" type=\"modify\">\
         <bad-request xmlns=\"urn:ietf:params:xml:ns:xmpp-stanzas\"/></error>"
    );
    assert_eq!(error.condition().unwrap(), Some(Condition::BadRequest));
    assert_eq!(error.error_type().unwrap(), Some(ErrorType::Modify));
    assert_eq!(error.text(), None);
    assert_eq!(error.application_condition_name(), None);

    let error = PacketError::with_type(Condition::BadRequest, ErrorType::Cancel).unwrap();
    assert_eq!(error.error_type().unwrap(), Some(ErrorType::Cancel));
}

#[test]
fn change_condition() {
    let mut error = PacketError::new(Condition::Conflict).unwrap();
    error.set_condition(Condition::NotAllowed).unwrap();
    assert_eq!(error.condition().unwrap(), Some(Condition::NotAllowed));
    assert_eq!(error.attribute("code"), Some("405"));
    assert_eq!(
        error
            .element()
            .elements()
            .filter(|child| child.namespace() == Some(STANZAS_NS))
            .count(),
        1
    );
    error.set_error_type(ErrorType::Wait).unwrap();
    assert_eq!(error.error_type().unwrap(), Some(ErrorType::Wait));
}

#[test]
fn text() {
    let mut error = PacketError::new(Condition::Gone).unwrap();
    error.set_text(Some("moved away")).unwrap();
    assert_eq!(error.text().as_deref(), Some("moved away"));
    assert_eq!(error.text_lang(), None);
    error
        .set_text_with_lang(Some("parti"), Some("fr"))
        .unwrap();
    assert_eq!(error.text().as_deref(), Some("parti"));
    assert_eq!(error.text_lang(), Some("fr"));
    assert_eq!(error.condition().unwrap(), Some(Condition::Gone));
    error.set_text(None).unwrap();
    assert_eq!(error.text(), None);
}

#[test]
fn application_condition() {
    let mut error = PacketError::new(Condition::BadRequest).unwrap();
    error
        .set_application_condition(Some("too-many-cats"), None)
        .unwrap();
    assert_eq!(error.application_condition_name(), Some("too-many-cats"));
    assert_eq!(
        error.application_condition_namespace(),
        Some(APP_ERRORS_NS)
    );

    error
        .set_application_condition(Some("unsupported"), Some("urn:example:errors"))
        .unwrap();
    assert_eq!(error.application_condition_name(), Some("unsupported"));
    assert_eq!(
        error.application_condition_namespace(),
        Some("urn:example:errors")
    );
    assert_eq!(error.element().elements().count(), 2);

    assert!(matches!(
        error.set_application_condition(Some("x"), Some(STANZAS_NS)),
        Err(XmppError::InvariantViolation(_))
    ));

    error.set_application_condition(None, None).unwrap();
    assert_eq!(error.application_condition_name(), None);
    assert_eq!(error.condition().unwrap(), Some(Condition::BadRequest));
}

#[test]
fn parsed_errors() {
    let doc = Document::from_str(
        "<iq><error type='cancel'>\
         <item-not-found xmlns='urn:ietf:params:xml:ns:xmpp-stanzas'/>\
         <text xmlns='urn:ietf:params:xml:ns:xmpp-stanzas' xml:lang='en'>nope</text>\
         </error></iq>",
    )
    .unwrap();
    let error = PacketError::from_element(doc.root().first_tag()).unwrap();
    assert_eq!(error.condition().unwrap(), Some(Condition::ItemNotFound));
    assert_eq!(error.text().as_deref(), Some("nope"));
    assert_eq!(error.text_lang(), Some("en"));
    assert_eq!(error.application_condition_name(), None);
}

#[test]
fn legacy_only_errors() {
    let error = PacketError::from_element(
        Document::from_str("<error code='404'/>").unwrap().root(),
    )
    .unwrap();
    assert_eq!(error.condition().unwrap(), Some(Condition::ItemNotFound));

    let error =
        PacketError::from_element(Document::from_str("<error code='999'/>").unwrap().root())
            .unwrap();
    assert_eq!(error.condition(), Err(XmppError::UnknownLegacyCode(999)));

    let error =
        PacketError::from_element(Document::from_str("<error code='abc'/>").unwrap().root())
            .unwrap();
    assert!(matches!(
        error.condition(),
        Err(XmppError::InvalidEnumValue { .. })
    ));

    let error =
        PacketError::from_element(Document::from_str("<error/>").unwrap().root()).unwrap();
    assert_eq!(error.condition().unwrap(), None);
    assert_eq!(error.error_type().unwrap(), None);
}
