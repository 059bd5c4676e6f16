/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::Attribute;
use super::Cursor;
use super::Document;
use super::NodePayload;

/// Namespace bound to the `xml` prefix in every document.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

const XMLNS: &str = "xmlns";

/// Namespace filter for element lookups.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Ns<'a> {
    /// Element is in no namespace, or in the namespace of its parent.
    Default,
    /// Element may be in any namespace.
    Any,
    /// Element is in exactly this namespace.
    Uri(&'a str),
}

impl<'a> From<&'a str> for Ns<'a> {
    fn from(uri: &'a str) -> Self {
        Ns::Uri(uri)
    }
}

impl<'a> From<Option<&'a str>> for Ns<'a> {
    fn from(uri: Option<&'a str>) -> Self {
        match uri {
            Some(uri) => Ns::Uri(uri),
            None => Ns::Default,
        }
    }
}

pub(super) fn split_name(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

pub(super) fn declaration_name(prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => format!("{XMLNS}:{prefix}"),
        None => XMLNS.to_string(),
    }
}

/// Prefixes of the element and attribute names in a subtree, None
/// standing for unprefixed element names.
fn used_prefixes<'a>(source: Cursor<'a>) -> Vec<Option<&'a str>> {
    let mut used = Vec::new();
    for node in source.descendant_or_self() {
        if !node.is_tag() {
            continue;
        }
        let prefix = node.prefix();
        if !used.contains(&prefix) {
            used.push(prefix);
        }
        for (name, _) in node.attributes() {
            if let (Some(prefix), _) = split_name(name)
                && prefix != XMLNS
                && prefix != "xml"
                && !used.contains(&Some(prefix))
            {
                used.push(Some(prefix));
            }
        }
    }
    used
}

/// Returns the prefix declared by an attribute name, if it is a declaration.
pub(super) fn declared_prefix(attribute_name: &str) -> Option<Option<&str>> {
    if attribute_name == XMLNS {
        return Some(None);
    }
    attribute_name
        .strip_prefix("xmlns:")
        .map(Some)
}

impl Document {
    pub(super) fn lookup_namespace(&self, node: Option<u32>, prefix: Option<&str>) -> Option<&str> {
        if prefix == Some("xml") {
            return Some(XML_NS);
        }
        let mut current = node;
        while let Some(index) = current {
            let node = self.node(index);
            if let NodePayload::Tag(tag) = &node.payload {
                for attr in &tag.attributes {
                    if declared_prefix(&attr.name) == Some(prefix) {
                        if attr.value.is_empty() {
                            return None;
                        }
                        return Some(&attr.value);
                    }
                }
            }
            current = node.parent;
        }
        None
    }

    /// Declarations in scope at the source element which are not visible
    /// with the same value under the destination parent.
    pub(super) fn missing_declarations(
        &self,
        parent: Option<u32>,
        source: Cursor<'_>,
    ) -> Vec<Attribute> {
        let own: Vec<Option<&str>> = source
            .attributes()
            .filter_map(|(name, _)| declared_prefix(name))
            .collect();
        let used = used_prefixes(source);
        let mut seen: Vec<Option<&str>> = Vec::new();
        let mut missing = Vec::new();
        let mut ancestor = source.parent();
        while !ancestor.is_null() {
            for (name, value) in ancestor.attributes() {
                let Some(prefix) = declared_prefix(name) else {
                    continue;
                };
                if seen.contains(&prefix) {
                    continue;
                }
                seen.push(prefix);
                if own.contains(&prefix) || value.is_empty() || !used.contains(&prefix) {
                    continue;
                }
                if self.lookup_namespace(parent, prefix) != Some(value) {
                    missing.push(Attribute {
                        name: name.to_string(),
                        value: value.to_string(),
                    });
                }
            }
            ancestor = ancestor.parent();
        }
        missing
    }

    /// Recomputes the namespace of every tag under and including start
    /// from the declarations now in scope.
    pub(super) fn resolve_namespaces(&mut self, start: u32) {
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            let Some(tag) = self.tag(index) else {
                continue;
            };
            let mut child = tag.first_child;
            let prefix = split_name(&tag.name).0;
            let namespace = self
                .lookup_namespace(Some(index), prefix)
                .map(str::to_string);
            self.tag_mut(index).namespace = namespace;
            while let Some(next) = child {
                stack.push(next);
                child = self.node(next).next;
            }
        }
    }
}
