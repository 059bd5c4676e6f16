/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;
use std::str::FromStr;

use crate::Cursor;
use crate::Document;
use crate::DocumentFactory;
use crate::Ns;
use crate::xmpp::Jid;
use crate::xmpp::XmlElement;
use crate::xmpp::XmppError;
use crate::xmpp::wire::WireTable;
use crate::xmpp::wire::from_wire;
use crate::xmpp::wire::to_wire;

pub(super) const FIELD_TAG: &str = "field";
const VALUE_TAG: &str = "value";
const OPTION_TAG: &str = "option";
const DESC_TAG: &str = "desc";
const REQUIRED_TAG: &str = "required";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FieldType {
    Boolean,
    Fixed,
    Hidden,
    JidMulti,
    JidSingle,
    ListMulti,
    ListSingle,
    TextMulti,
    TextPrivate,
    TextSingle,
}

const FIELD_TYPES: &WireTable<FieldType> = &[
    (FieldType::Boolean, "boolean"),
    (FieldType::Fixed, "fixed"),
    (FieldType::Hidden, "hidden"),
    (FieldType::JidMulti, "jid-multi"),
    (FieldType::JidSingle, "jid-single"),
    (FieldType::ListMulti, "list-multi"),
    (FieldType::ListSingle, "list-single"),
    (FieldType::TextMulti, "text-multi"),
    (FieldType::TextPrivate, "text-private"),
    (FieldType::TextSingle, "text-single"),
];

impl FieldType {
    pub fn as_str(self) -> &'static str {
        to_wire(FIELD_TYPES, self)
    }
}

impl FromStr for FieldType {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_wire(FIELD_TYPES, "field type", s)
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One choice of a list field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldOption {
    pub label: Option<String>,
    pub value: String,
}

/// Values which can be stored in a form field.
pub trait FormValue {
    fn encode(&self) -> String;
}

impl FormValue for str {
    fn encode(&self) -> String {
        self.to_string()
    }
}

impl FormValue for String {
    fn encode(&self) -> String {
        self.clone()
    }
}

impl FormValue for bool {
    fn encode(&self) -> String {
        String::from(if *self { "1" } else { "0" })
    }
}

impl FormValue for Jid {
    fn encode(&self) -> String {
        self.full().to_string()
    }
}

macro_rules! integer_form_value {
    ($($ty:ty),*) => {
        $(
            impl FormValue for $ty {
                fn encode(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_form_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// A field of a data form.
#[derive(Clone, Debug)]
pub struct FormField {
    doc: Document,
}

impl FormField {
    pub fn new(var: &str) -> Result<FormField, XmppError> {
        let mut field = FormField {
            doc: Document::new(FIELD_TAG)?,
        };
        field.set_var(Some(var))?;
        Ok(field)
    }

    pub fn with_type(var: &str, field_type: FieldType) -> Result<FormField, XmppError> {
        let mut field = FormField::new(var)?;
        field.set_field_type(Some(field_type))?;
        Ok(field)
    }

    /// Creates a field from a copy of the element.
    pub fn from_element(element: Cursor<'_>) -> Result<FormField, XmppError> {
        Ok(FormField {
            doc: DocumentFactory::global().import(element)?,
        })
    }

    pub fn field_type(&self) -> Result<Option<FieldType>, XmppError> {
        self.attribute("type")
            .map(str::parse::<FieldType>)
            .transpose()
    }

    pub fn set_field_type(&mut self, field_type: Option<FieldType>) -> Result<(), XmppError> {
        self.set_attribute("type", field_type.map(FieldType::as_str))
    }

    pub fn var(&self) -> Option<&str> {
        self.attribute("var")
    }

    pub fn set_var(&mut self, var: Option<&str>) -> Result<(), XmppError> {
        self.set_attribute("var", var)
    }

    pub fn label(&self) -> Option<&str> {
        self.attribute("label")
    }

    pub fn set_label(&mut self, label: Option<&str>) -> Result<(), XmppError> {
        self.set_attribute("label", label)
    }

    pub fn description(&self) -> Option<String> {
        self.child_text(DESC_TAG, Ns::Default)
    }

    pub fn set_description(&mut self, description: Option<&str>) -> Result<(), XmppError> {
        self.set_child_text(DESC_TAG, Ns::Default, description)
    }

    pub fn is_required(&self) -> bool {
        self.first_child(REQUIRED_TAG, Ns::Default).is_some()
    }

    pub fn set_required(&mut self, required: bool) -> Result<(), XmppError> {
        if required == self.is_required() {
            return Ok(());
        }
        if required {
            self.add_child(REQUIRED_TAG, Ns::Default)?;
        } else {
            self.element_mut()
                .remove_children(REQUIRED_TAG, Ns::Default);
        }
        Ok(())
    }

    /// Values in document order, with surrounding whitespace trimmed.
    /// Values in document order, with surrounding whitespace trimmed.
    pub fn values(&self) -> Vec<String> {
        self.children(VALUE_TAG, Ns::Default)
            .map(|value| value.text().trim().to_string())
            .collect()
    }

    pub fn first_value(&self) -> Option<String> {
        self.values().into_iter().next()
    }

    pub fn add_value<V: FormValue + ?Sized>(&mut self, value: &V) -> Result<(), XmppError> {
        self.add_child(VALUE_TAG, Ns::Default)?
            .set_text(&value.encode())?;
        Ok(())
    }

    pub fn clear_values(&mut self) {
        self.element_mut()
            .remove_children(VALUE_TAG, Ns::Default);
    }

    pub fn options(&self) -> Vec<FieldOption> {
        self.children(OPTION_TAG, Ns::Default)
            .map(|option| FieldOption {
                label: option
                    .attribute("label")
                    .map(str::to_string),
                value: option
                    .child_text(VALUE_TAG, Ns::Default)
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Appends an option. Blank values are ignored.
    pub fn add_option(&mut self, label: Option<&str>, value: &str) -> Result<(), XmppError> {
        if value.trim().is_empty() {
            return Ok(());
        }
        let mut option = self.add_child(OPTION_TAG, Ns::Default)?;
        option.set_attribute("label", label)?;
        option.set_child_text(VALUE_TAG, Ns::Default, Some(value))?;
        Ok(())
    }
}

impl XmlElement for FormField {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.doc, f)
    }
}
