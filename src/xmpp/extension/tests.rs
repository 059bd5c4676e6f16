/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::str::FromStr;
use std::sync::Arc;

use super::*;
use crate::Ns;
use crate::xmpp::FormType;

const DELAY_NS: &str = "urn:xmpp:delay";

#[derive(Debug)]
struct Delay {
    doc: Document,
}

impl Delay {
    fn stamp(&self) -> Option<&str> {
        self.attribute("stamp")
    }
}

impl XmlElement for Delay {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

impl TypedExtension for Delay {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn delay_factory(extension: PacketExtension) -> Result<Extension, XmppError> {
    if extension.attribute("stamp").is_none() {
        return Err(XmppError::InvariantViolation("delay without stamp"));
    }
    Ok(Extension::Typed(Box::new(Delay {
        doc: extension.into_document(),
    })))
}

fn registry() -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::with_defaults();
    registry.register("delay", DELAY_NS, Arc::new(delay_factory));
    registry
}

fn host(text: &str) -> Document {
    Document::from_str(text).unwrap()
}

#[test]
fn generic_extension() {
    let ext = PacketExtension::new("x", "jabber:x:oob").unwrap();
    assert_eq!(ext.name(), "x");
    assert_eq!(ext.namespace(), Some("jabber:x:oob"));
    assert_eq!(ext.to_string(), "<x xmlns=\"jabber:x:oob\"/>");

    let ext = PacketExtension::new("oob:x", "jabber:x:oob").unwrap();
    assert_eq!(ext.name(), "x");
    assert_eq!(ext.to_xml(), "<oob:x xmlns:oob=\"jabber:x:oob\"/>");
}

#[test]
fn unregistered_is_generic() {
    let doc = host("<message><x xmlns='jabber:x:oob'><url>u</url></x></message>");
    let found = registry()
        .extension_for(doc.root(), "x", "jabber:x:oob")
        .unwrap();
    let generic = found.as_generic().unwrap();
    assert_eq!(generic.child_text("url", Ns::Default).as_deref(), Some("u"));
    assert!(found.as_form().is_none());
    assert!(found.downcast_ref::<Delay>().is_none());
    assert_eq!(found.to_string(), "<x xmlns=\"jabber:x:oob\"><url>u</url></x>");
}

#[test]
fn missing_child() {
    let doc = host("<message><x xmlns='jabber:x:oob'/></message>");
    let registry = registry();
    assert!(registry.extension_for(doc.root(), "x", "jabber:x:other").is_none());
    assert!(registry.extension_for(doc.root(), "y", "jabber:x:oob").is_none());
    assert!(registry.extension_for(doc.root(), "delay", DELAY_NS).is_none());
}

#[test]
fn typed_extension() {
    let doc = host("<message><delay xmlns='urn:xmpp:delay' stamp='2002-09-10T23:08:25Z'/></message>");
    let found = registry()
        .extension_for(doc.root(), "delay", DELAY_NS)
        .unwrap();
    let delay = found.downcast_ref::<Delay>().unwrap();
    assert_eq!(delay.stamp(), Some("2002-09-10T23:08:25Z"));
    assert_eq!(found.name(), "delay");
    assert_eq!(found.namespace(), Some(DELAY_NS));
}

#[test]
fn failing_factory() {
    let doc = host("<message><delay xmlns='urn:xmpp:delay'/></message>");
    assert!(
        registry()
            .extension_for(doc.root(), "delay", DELAY_NS)
            .is_none()
    );
    assert!(
        ExtensionRegistry::new()
            .extension_for(doc.root(), "delay", DELAY_NS)
            .is_some()
    );
}

#[test]
fn data_form_extension() {
    let doc = host(
        "<message><x xmlns='jabber:x:data' type='result'>\
         <field var='a'><value>1</value></field></x></message>",
    );
    let found = ExtensionRegistry::with_defaults()
        .extension_for(doc.root(), "x", "jabber:x:data")
        .unwrap();
    let form = found.as_form().unwrap();
    assert_eq!(form.form_type().unwrap(), Some(FormType::Result));
    assert_eq!(form.field_values("a"), vec!["1"]);
}

#[test]
fn only_direct_children() {
    let doc = host("<message><body><x xmlns='jabber:x:oob'/></body></message>");
    assert!(
        registry()
            .extension_for(doc.root(), "x", "jabber:x:oob")
            .is_none()
    );
}

#[test]
fn snapshots() {
    let doc = host("<message><x xmlns='jabber:x:oob'><url>u</url></x></message>");
    let Some(Extension::Generic(mut ext)) =
        registry().extension_for(doc.root(), "x", "jabber:x:oob")
    else {
        panic!("expected a generic extension");
    };
    ext.set_child_text("url", Ns::Default, Some("changed")).unwrap();
    assert_eq!(ext.child_text("url", Ns::Default).as_deref(), Some("changed"));
    assert_eq!(
        doc.root().first_tag().child_text("url", Ns::Default).as_deref(),
        Some("u")
    );
}

#[test]
fn registration() {
    let mut registry = ExtensionRegistry::new();
    assert!(!registry.is_registered("x", "jabber:x:data"));
    registry.register("delay", DELAY_NS, Arc::new(delay_factory));
    assert!(registry.is_registered("delay", DELAY_NS));
    assert!(!registry.is_registered("delay", "jabber:x:delay"));
    assert!(registry.unregister("delay", DELAY_NS));
    assert!(!registry.unregister("delay", DELAY_NS));

    assert!(ExtensionRegistry::with_defaults().is_registered("x", "jabber:x:data"));
}

#[test]
fn global_registry() {
    assert!(ExtensionRegistry::global().is_registered("x", "jabber:x:data"));
    assert!(matches!(
        ExtensionRegistry::install(ExtensionRegistry::new()),
        Err(XmppError::InvariantViolation(_))
    ));
}
