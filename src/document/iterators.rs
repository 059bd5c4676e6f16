/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::iter::FusedIterator;

use super::Attribute;
use super::Cursor;
use super::Tag;

/// Attribute name and value pairs of a tag, in document order.
///
/// Namespace declarations are ordinary attributes here.
pub struct Attributes<'a> {
    inner: std::slice::Iter<'a, Attribute>,
}

impl<'a> Attributes<'a> {
    pub(super) fn new(tag: Option<&'a Tag>) -> Self {
        let inner = tag.map_or(&[][..], |tag| tag.attributes.as_slice()).iter();
        Attributes { inner }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let attr = self.inner.next()?;
        Some((attr.name.as_str(), attr.value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Attributes<'_> {}

impl FusedIterator for Attributes<'_> {}

/// Sibling walk starting at a node, text nodes included.
pub struct Children<'a> {
    current: Cursor<'a>,
}

impl<'a> Children<'a> {
    pub(super) fn new(first: Cursor<'a>) -> Self {
        Children { current: first }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_null() {
            return None;
        }
        let next = self.current.next();
        Some(std::mem::replace(&mut self.current, next))
    }
}

impl FusedIterator for Children<'_> {}

/// Pre-order walk over a subtree, never leaving its starting node.
pub struct DescendantOrSelf<'a> {
    top: Option<u32>,
    pending: Cursor<'a>,
}

impl<'a> DescendantOrSelf<'a> {
    pub(super) fn new(start: Cursor<'a>) -> Self {
        DescendantOrSelf {
            top: start.node,
            pending: start,
        }
    }

    fn successor(&self, node: Cursor<'a>) -> Cursor<'a> {
        let child = node.first_child();
        if !child.is_null() {
            return child;
        }
        let mut climb = node;
        while climb.node != self.top {
            let sibling = climb.next();
            if !sibling.is_null() {
                return sibling;
            }
            climb = climb.parent();
        }
        climb.with(None)
    }
}

impl<'a> Iterator for DescendantOrSelf<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_null() {
            return None;
        }
        let node = self.pending;
        self.pending = self.successor(node);
        Some(node)
    }
}

impl FusedIterator for DescendantOrSelf<'_> {}
