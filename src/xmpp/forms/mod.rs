/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod field;

use std::fmt::Display;
use std::str::FromStr;

pub use field::FieldOption;
pub use field::FieldType;
pub use field::FormField;
pub use field::FormValue;

use field::FIELD_TAG;

use super::XmlElement;
use super::XmppError;
use super::constants::DATA_FORMS_NS;
use super::error::description;
use super::wire::WireTable;
use super::wire::from_wire;
use super::wire::to_wire;
use crate::Cursor;
use crate::Document;
use crate::DocumentFactory;
use crate::NodeId;
use crate::Ns;

pub(crate) const FORM_TAG: &str = "x";
const TITLE_TAG: &str = "title";
const INSTRUCTIONS_TAG: &str = "instructions";

/// Purpose of a data form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FormType {
    /// Asks the receiver to fill in the fields.
    Form,
    /// Carries the values of a completed form.
    Submit,
    /// Cancels a form exchange.
    Cancel,
    /// Carries data returned by a query.
    Result,
}

const FORM_TYPES: &WireTable<FormType> = &[
    (FormType::Form, "form"),
    (FormType::Submit, "submit"),
    (FormType::Cancel, "cancel"),
    (FormType::Result, "result"),
];

impl FormType {
    pub fn as_str(self) -> &'static str {
        to_wire(FORM_TYPES, self)
    }
}

impl FromStr for FormType {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_wire(FORM_TYPES, "form type", s)
    }
}

impl Display for FormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `jabber:x:data` form.
///
/// Fields read from a form are copies. Changes go back into the form
/// through [DataForm::add_field] or [DataForm::replace_field].
///
/// ```
/// use tinder::xmpp::{DataForm, FieldType, FormField, FormType};
///
/// let mut form = DataForm::new(FormType::Submit).unwrap();
/// let mut field = FormField::with_type("muc#roomconfig_persistentroom", FieldType::Boolean).unwrap();
/// field.add_value(&true).unwrap();
/// form.add_field(field).unwrap();
/// assert_eq!(form.field_values("muc#roomconfig_persistentroom"), vec!["1"]);
/// ```
#[derive(Clone, Debug)]
pub struct DataForm {
    doc: Document,
}

impl DataForm {
    pub fn new(form_type: FormType) -> Result<DataForm, XmppError> {
        let mut form = DataForm {
            doc: Document::with_namespace(FORM_TAG, Some(DATA_FORMS_NS))?,
        };
        form.set_form_type(form_type)?;
        Ok(form)
    }

    /// Creates a form from a copy of the element.
    pub fn from_element(element: Cursor<'_>) -> Result<DataForm, XmppError> {
        let doc = DocumentFactory::global().import(element)?;
        let root = doc.root();
        if root.local_name() != FORM_TAG || root.namespace() != Some(DATA_FORMS_NS) {
            return Err(XmppError::InvariantViolation(description::WRONG_ELEMENT));
        }
        Ok(DataForm { doc })
    }

    pub fn form_type(&self) -> Result<Option<FormType>, XmppError> {
        self.attribute("type")
            .map(str::parse::<FormType>)
            .transpose()
    }

    pub fn set_form_type(&mut self, form_type: FormType) -> Result<(), XmppError> {
        self.set_attribute("type", Some(form_type.as_str()))
    }

    pub fn title(&self) -> Option<String> {
        self.child_text(TITLE_TAG, Ns::Default)
    }

    pub fn set_title(&mut self, title: Option<&str>) -> Result<(), XmppError> {
        self.set_child_text(TITLE_TAG, Ns::Default, title)
    }

    pub fn instructions(&self) -> Vec<String> {
        self.children(INSTRUCTIONS_TAG, Ns::Default)
            .map(|child| child.text())
            .collect()
    }

    pub fn add_instruction(&mut self, text: &str) -> Result<(), XmppError> {
        self.add_child(INSTRUCTIONS_TAG, Ns::Default)?
            .set_text(text)?;
        Ok(())
    }

    pub fn clear_instructions(&mut self) {
        self.element_mut()
            .remove_children(INSTRUCTIONS_TAG, Ns::Default);
    }

    /// Copies of the fields in document order.
    pub fn fields(&self) -> Result<Vec<FormField>, XmppError> {
        self.children(FIELD_TAG, Ns::Default)
            .map(FormField::from_element)
            .collect()
    }

    /// Copy of the first field with the variable name.
    pub fn field(&self, var: &str) -> Result<Option<FormField>, XmppError> {
        self.children(FIELD_TAG, Ns::Default)
            .find(|field| field.attribute("var") == Some(var))
            .map(FormField::from_element)
            .transpose()
    }

    /// Values of the first field with the variable name, or an empty
    /// list if there is no such field.
    pub fn field_values(&self, var: &str) -> Vec<String> {
        match self.field(var) {
            Ok(Some(field)) => field.values(),
            _ => Vec::new(),
        }
    }

    pub fn has_field(&self, var: &str) -> bool {
        !self.field_ids(var).is_empty()
    }

    pub fn add_field(&mut self, field: FormField) -> Result<(), XmppError> {
        self.element_mut().append_copy(field.element())?;
        Ok(())
    }

    /// Puts the field in place of the first field with the same variable
    /// name, or appends it if there is none.
    pub fn replace_field(&mut self, field: FormField) -> Result<(), XmppError> {
        let existing = field
            .var()
            .and_then(|var| self.field_ids(var).first().copied());
        match existing {
            Some(id) => {
                self.doc
                    .cursor_mut(id)?
                    .replace_with_copy(field.element())?;
            }
            None => {
                self.element_mut().append_copy(field.element())?;
            }
        }
        Ok(())
    }

    /// Removes every field with the variable name. Returns true if there
    /// was at least one.
    pub fn remove_field(&mut self, var: &str) -> Result<bool, XmppError> {
        let ids = self.field_ids(var);
        for id in &ids {
            self.doc.cursor_mut(*id)?.remove();
        }
        Ok(!ids.is_empty())
    }

    fn field_ids(&self, var: &str) -> Vec<NodeId> {
        self.children(FIELD_TAG, Ns::Default)
            .filter(|field| field.attribute("var") == Some(var))
            .filter_map(|field| field.id())
            .collect()
    }
}

impl XmlElement for DataForm {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}

impl FromStr for DataForm {
    type Err = XmppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let doc = DocumentFactory::global().parse(s)?;
        DataForm::from_element(doc.root())
    }
}

impl Display for DataForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.doc, f)
    }
}
