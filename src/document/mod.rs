/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod builder;
mod edit;
mod error;
mod factory;
mod iterators;
mod namespace;

use std::fmt::Debug;
use std::str::FromStr;

use crate::arena::Arena;
use crate::arena::ArenaStats;
use crate::arena::NodeId;
use crate::entities::escape;
use crate::entities::escape_fmt;
use crate::entities::escaped_size;
pub use edit::CursorMut;
use error::description;
pub use error::DocumentError;
pub use factory::DocumentFactory;
pub use factory::FactoryConfig;
pub use iterators::Attributes;
pub use iterators::Children;
pub use iterators::DescendantOrSelf;
pub use namespace::Ns;
pub use namespace::XML_NS;
use namespace::split_name;

#[derive(Clone, Debug)]
struct Node {
    parent: Option<u32>,
    previous: Option<u32>,
    next: Option<u32>,
    payload: NodePayload,
}

#[derive(Clone, Debug)]
enum NodePayload {
    Tag(Tag),
    CData(String),
}

#[derive(Clone, Debug)]
struct Tag {
    name: String,
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    first_child: Option<u32>,
    last_child: Option<u32>,
}

#[derive(Clone, Debug)]
struct Attribute {
    name: String,
    value: String,
}

struct Visitor<'a> {
    document: &'a Document,
    going_down: bool,
    current: Option<u32>,
    level: usize,
}

enum VisitorStep<'a> {
    StartTag(&'a Tag),
    EndTag(&'a Tag),
    CData(&'a str),
}

impl<'a> Visitor<'a> {
    fn new(document: &'a Document, start: Option<u32>) -> Visitor<'a> {
        Visitor {
            document,
            going_down: true,
            current: start,
            level: 0,
        }
    }

    fn step(&mut self, index: u32) {
        let node = self.document.node(index);
        if self.going_down
            && let NodePayload::Tag(tag) = &node.payload
            && let Some(child) = tag.first_child
        {
            self.current = Some(child);
            self.level += 1;
            return;
        }
        if self.level == 0 {
            self.current = None;
            return;
        }
        match node.next {
            None => {
                self.level -= 1;
                self.current = node.parent;
                self.going_down = false;
            }
            Some(next) => {
                self.current = Some(next);
                self.going_down = true;
            }
        }
    }

    fn next(&mut self) -> Option<VisitorStep<'a>> {
        let index = self.current?;
        let going_down = self.going_down;
        self.step(index);
        let document: &'a Document = self.document;
        match &document.node(index).payload {
            NodePayload::Tag(tag) => {
                if going_down {
                    Some(VisitorStep::StartTag(tag))
                } else {
                    Some(VisitorStep::EndTag(tag))
                }
            }
            NodePayload::CData(cdata) => Some(VisitorStep::CData(cdata)),
        }
    }
}

/// An XML element tree stored in its own arena.
///
/// The document exclusively owns every node. Removed nodes give their
/// slots back for reuse, and handles of removed nodes are no longer
/// accepted. Cloning performs a deep copy into a new arena, and node
/// handles of the original are not accepted by the copy.
#[derive(Clone)]
pub struct Document {
    arena: Arena<Node>,
    root: u32,
}

impl Document {
    /// Creates a document with a root tag in no namespace.
    pub fn new(root_tag_name: &str) -> Result<Document, DocumentError> {
        if split_name(root_tag_name).0.is_some() {
            return Err(DocumentError::BadXml(description::UNBOUND_PREFIX));
        }
        Document::empty(root_tag_name)
    }

    /// Creates a document with a root tag in the given namespace.
    ///
    /// A declaration for the prefix of the name (or the default
    /// namespace for an unprefixed name) is added to the root tag.
    pub fn with_namespace(
        qualified_name: &str,
        namespace: Option<&str>,
    ) -> Result<Document, DocumentError> {
        let Some(namespace) = namespace else {
            return Document::new(qualified_name);
        };
        let mut doc = Document::empty(qualified_name)?;
        let (prefix, _) = split_name(qualified_name);
        let root = doc.root;
        doc.tag_mut(root).attributes.push(Attribute {
            name: namespace::declaration_name(prefix),
            value: namespace.to_string(),
        });
        doc.tag_mut(root).namespace = Some(namespace.to_string());
        Ok(doc)
    }

    fn empty(root_tag_name: &str) -> Result<Document, DocumentError> {
        if root_tag_name.is_empty() {
            return Err(DocumentError::BadXml(description::EMPTY_NAME));
        }
        let mut arena = Arena::new()?;
        let root = arena.alloc(Node {
            parent: None,
            previous: None,
            next: None,
            payload: NodePayload::Tag(Tag::new(root_tag_name, None)),
        })?;
        Ok(Document { arena, root })
    }

    /// Copies the element under the cursor into a new document.
    ///
    /// Namespace declarations made by the ancestors of the element in
    /// the source document are copied to the new root, so every copied
    /// element keeps its namespace.
    pub fn import(source: Cursor<'_>) -> Result<Document, DocumentError> {
        let Some(tag) = source.tag() else {
            return Err(DocumentError::BadXml(description::IMPORT_NOT_TAG));
        };
        let mut doc = Document::empty(&tag.name)?;
        let root = doc.root;
        let declarations = doc.missing_declarations(None, source);
        doc.copy_into(root, source)?;
        doc.tag_mut(root).attributes.extend(declarations);
        doc.resolve_namespaces(root);
        Ok(doc)
    }

    pub fn root(&self) -> Cursor<'_> {
        Cursor::new(self, Some(self.root))
    }

    pub fn root_mut(&mut self) -> CursorMut<'_> {
        let root = self.root;
        CursorMut::new(self, root)
    }

    /// Returns a cursor for the node handle, or a null cursor if the
    /// handle was issued by another document.
    pub fn cursor(&self, id: NodeId) -> Cursor<'_> {
        Cursor::new(self, self.arena.resolve(id))
    }

    pub fn cursor_mut(&mut self, id: NodeId) -> Result<CursorMut<'_>, DocumentError> {
        match self.arena.resolve(id) {
            Some(index) => Ok(CursorMut::new(self, index)),
            None => Err(DocumentError::ForeignNode),
        }
    }

    pub fn owns(&self, id: NodeId) -> bool {
        self.arena.owns(id)
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    #[allow(
        clippy::inherent_to_string_shadow_display,
        reason = "prereserving exact capacity makes this function significantly faster"
    )]
    pub fn to_string(&self) -> String {
        self.root().to_string()
    }

    //
    // Internal node access
    //

    fn node(&self, index: u32) -> &Node {
        self.arena.get(index)
    }

    fn node_mut(&mut self, index: u32) -> &mut Node {
        self.arena.get_mut(index)
    }

    fn tag(&self, index: u32) -> Option<&Tag> {
        match &self.node(index).payload {
            NodePayload::Tag(tag) => Some(tag),
            NodePayload::CData(_) => None,
        }
    }

    // Only called with indices known to be tags.
    fn tag_mut(&mut self, index: u32) -> &mut Tag {
        match &mut self.node_mut(index).payload {
            NodePayload::Tag(tag) => tag,
            NodePayload::CData(_) => unreachable!("cdata nodes have no tag data"),
        }
    }

    fn cursor_at(&mut self, index: u32) -> CursorMut<'_> {
        CursorMut::new(self, index)
    }

    fn alloc_node(&mut self, payload: NodePayload) -> Result<u32, DocumentError> {
        Ok(self.arena.alloc(Node {
            parent: None,
            previous: None,
            next: None,
            payload,
        })?)
    }

    fn link_last(&mut self, parent: u32, child: u32) {
        let last = self.tag(parent).and_then(|tag| tag.last_child);
        {
            let node = self.node_mut(child);
            node.parent = Some(parent);
            node.previous = last;
            node.next = None;
        }
        match last {
            Some(last) => self.node_mut(last).next = Some(child),
            None => self.tag_mut(parent).first_child = Some(child),
        }
        self.tag_mut(parent).last_child = Some(child);
    }

    fn link_before(&mut self, sibling: u32, child: u32) {
        let Some(parent) = self.node(sibling).parent else {
            return;
        };
        let previous = self.node(sibling).previous;
        {
            let node = self.node_mut(child);
            node.parent = Some(parent);
            node.previous = previous;
            node.next = Some(sibling);
        }
        self.node_mut(sibling).previous = Some(child);
        match previous {
            Some(previous) => self.node_mut(previous).next = Some(child),
            None => self.tag_mut(parent).first_child = Some(child),
        }
    }

    fn unlink(&mut self, index: u32) {
        let Some(parent) = self.node(index).parent else {
            // Root element stays in place
            return;
        };
        let previous = self.node(index).previous;
        let next = self.node(index).next;
        match previous {
            Some(previous) => self.node_mut(previous).next = next,
            None => self.tag_mut(parent).first_child = next,
        }
        match next {
            Some(next) => self.node_mut(next).previous = previous,
            None => self.tag_mut(parent).last_child = previous,
        }
        let node = self.node_mut(index);
        node.parent = None;
        node.previous = None;
        node.next = None;
    }

    /// Detaches the node and returns the slots of its subtree to the arena.
    fn release(&mut self, index: u32) {
        if index == self.root {
            return;
        }
        self.unlink(index);
        let mut pending = vec![index];
        while let Some(index) = pending.pop() {
            let mut child = self.tag(index).and_then(|tag| tag.first_child);
            while let Some(current) = child {
                pending.push(current);
                child = self.node(current).next;
            }
            self.arena.free(index, Node::vacant());
        }
    }

    /// Copies attributes and the whole content of the source tag under target.
    fn copy_into(&mut self, target: u32, source: Cursor<'_>) -> Result<(), DocumentError> {
        if let Some(tag) = source.tag() {
            self.tag_mut(target).attributes = tag.attributes.clone();
        }
        for child in source.children() {
            let payload = match &child.doc.node(child.index()).payload {
                NodePayload::Tag(tag) => NodePayload::Tag(Tag::new(&tag.name, None)),
                NodePayload::CData(cdata) => NodePayload::CData(cdata.clone()),
            };
            let is_tag = matches!(payload, NodePayload::Tag(_));
            let new = self.alloc_node(payload)?;
            self.link_last(target, new);
            if is_tag {
                self.copy_into(new, child)?;
            }
        }
        Ok(())
    }
}

impl Node {
    fn vacant() -> Node {
        Node {
            parent: None,
            previous: None,
            next: None,
            payload: NodePayload::CData(String::new()),
        }
    }
}

impl Tag {
    fn new(name: &str, namespace: Option<String>) -> Tag {
        Tag {
            name: name.to_string(),
            namespace,
            attributes: Vec::new(),
            first_child: None,
            last_child: None,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.root(), f)
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Document ({})", self.root())
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentFactory::global().parse(s)
    }
}

/// A read-only position in a [Document].
///
/// A cursor either points to a node or is null. Navigation methods on a
/// null cursor return null cursors and property methods return empty
/// values, so lookups can be chained without checks in between.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    doc: &'a Document,
    node: Option<u32>,
}

impl<'a> Cursor<'a> {
    fn new(doc: &'a Document, node: Option<u32>) -> Cursor<'a> {
        Cursor { doc, node }
    }

    fn with(&self, node: Option<u32>) -> Cursor<'a> {
        Cursor::new(self.doc, node)
    }

    fn index(&self) -> u32 {
        // Callers only reach here through non-null cursors
        self.node.unwrap_or(self.doc.root)
    }

    fn tag(&self) -> Option<&'a Tag> {
        let doc: &'a Document = self.doc;
        self.node.and_then(|index| doc.tag(index))
    }

    fn visitor(&self) -> Visitor<'a> {
        Visitor::new(self.doc, self.node)
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Handle of the node, usable with [Document::cursor_mut].
    pub fn id(&self) -> Option<NodeId> {
        self.node.map(|index| self.doc.arena.handle(index))
    }

    //
    // Navigation methods
    //

    pub fn next(self) -> Cursor<'a> {
        self.with(self.node.and_then(|index| self.doc.node(index).next))
    }

    pub fn next_tag(self) -> Cursor<'a> {
        let mut next = self.next();
        while !next.is_null() && !next.is_tag() {
            next = next.next();
        }
        next
    }

    pub fn previous(self) -> Cursor<'a> {
        self.with(self.node.and_then(|index| self.doc.node(index).previous))
    }

    pub fn parent(self) -> Cursor<'a> {
        self.with(self.node.and_then(|index| self.doc.node(index).parent))
    }

    pub fn root(self) -> Cursor<'a> {
        if self.is_null() {
            return self;
        }
        let mut current = self;
        loop {
            let parent = current.parent();
            if parent.is_null() {
                break;
            }
            current = parent;
        }
        current
    }

    pub fn first_child(self) -> Cursor<'a> {
        self.with(self.tag().and_then(|tag| tag.first_child))
    }

    pub fn last_child(self) -> Cursor<'a> {
        self.with(self.tag().and_then(|tag| tag.last_child))
    }

    pub fn first_tag(self) -> Cursor<'a> {
        let child = self.first_child();
        if child.is_null() || child.is_tag() {
            child
        } else {
            child.next_tag()
        }
    }

    /// Finds the first child tag with the given qualified name.
    pub fn find_tag(self, name: &str) -> Cursor<'a> {
        let mut child = self.first_child();
        while !child.is_null() {
            if child.name() == name {
                break;
            }
            child = child.next();
        }
        child
    }

    /// Finds the first child element with the local name in the namespace.
    pub fn find_element(self, local_name: &str, ns: Ns<'_>) -> Cursor<'a> {
        let mut child = self.first_child();
        while !child.is_null() {
            if child.matches(local_name, ns) {
                break;
            }
            child = child.next();
        }
        child
    }

    //
    // Iterator methods
    //

    pub fn children(self) -> Children<'a> {
        Children::new(self.first_child())
    }

    /// Iterates over the child elements, skipping character data.
    pub fn elements(self) -> impl Iterator<Item = Cursor<'a>> {
        self.children().filter(|child| child.is_tag())
    }

    /// Iterates over the child elements with the local name in the namespace.
    pub fn elements_named<'n>(
        self,
        local_name: &'n str,
        ns: Ns<'n>,
    ) -> impl Iterator<Item = Cursor<'a>> + use<'a, 'n> {
        self.children()
            .filter(move |child| child.matches(local_name, ns))
    }

    pub fn attributes(self) -> Attributes<'a> {
        Attributes::new(self.tag())
    }

    pub fn descendant_or_self(self) -> DescendantOrSelf<'a> {
        DescendantOrSelf::new(self)
    }

    //
    // Node property methods
    //

    pub fn is_null(&self) -> bool {
        self.node.is_none()
    }

    pub fn is_tag(&self) -> bool {
        self.tag().is_some()
    }

    /// Qualified name of the tag, including the prefix if any.
    pub fn name(&self) -> &'a str {
        match self.tag() {
            Some(tag) => &tag.name,
            None => "",
        }
    }

    pub fn local_name(&self) -> &'a str {
        split_name(self.name()).1
    }

    pub fn prefix(&self) -> Option<&'a str> {
        split_name(self.name()).0
    }

    /// Namespace URI of the tag, resolved when the tag was created.
    pub fn namespace(&self) -> Option<&'a str> {
        self.tag().and_then(|tag| tag.namespace.as_deref())
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.tag().and_then(|tag| tag.attribute(name))
    }

    pub fn cdata(&self) -> &'a str {
        let doc: &'a Document = self.doc;
        match self.node.map(|index| &doc.node(index).payload) {
            Some(NodePayload::CData(cdata)) => cdata,
            _ => "",
        }
    }

    /// Concatenated character data of the node and all its descendants.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in self.descendant_or_self() {
            text.push_str(node.cdata());
        }
        text
    }

    /// Text of the first matching child element, or None if there is none.
    pub fn child_text(&self, local_name: &str, ns: Ns<'_>) -> Option<String> {
        let child = self.find_element(local_name, ns);
        if child.is_null() {
            None
        } else {
            Some(child.text())
        }
    }

    /// True if the node is a tag with the local name in the namespace.
    pub fn matches(&self, local_name: &str, ns: Ns<'_>) -> bool {
        self.is_tag() && self.local_name() == local_name && self.in_namespace(ns)
    }

    pub fn in_namespace(&self, ns: Ns<'_>) -> bool {
        if !self.is_tag() {
            return false;
        }
        match ns {
            Ns::Any => true,
            Ns::Uri(uri) => self.namespace() == Some(uri),
            Ns::Default => {
                let own = self.namespace();
                own.is_none() || own == self.parent().namespace()
            }
        }
    }

    /// Resolves a prefix (None for the default namespace) at this node.
    pub fn lookup_namespace(&self, prefix: Option<&str>) -> Option<&'a str> {
        self.doc.lookup_namespace(self.node, prefix)
    }

    fn str_size(&self) -> usize {
        let mut size = 0;
        let mut visitor = self.visitor();
        while let Some(step) = visitor.next() {
            match step {
                VisitorStep::StartTag(tag) => {
                    size += 1; // Tag opening '<'
                    size += tag.name.len();
                    for attr in &tag.attributes {
                        size += 1; // space
                        size += attr.name.len();
                        size += 2; // =" characters
                        size += escaped_size(&attr.value);
                        size += 1; // " character
                    }
                    if tag.first_child.is_none() {
                        size += 2; // Standalone tag closing '/>'
                    } else {
                        size += 1;
                    }
                }
                VisitorStep::EndTag(tag) => {
                    if tag.first_child.is_some() {
                        size += 2; // End tag opening '</'
                        size += tag.name.len();
                        size += 1; // End tag closing '>'
                    }
                }
                VisitorStep::CData(cdata) => {
                    size += escaped_size(cdata);
                }
            }
        }

        size
    }

    #[allow(
        clippy::inherent_to_string_shadow_display,
        reason = "prereserving exact capacity makes this function significantly faster"
    )]
    pub fn to_string(&self) -> String {
        let mut buf = String::with_capacity(self.str_size());

        let mut visitor = self.visitor();
        while let Some(step) = visitor.next() {
            match step {
                VisitorStep::StartTag(tag) => {
                    buf.push('<');
                    buf.push_str(&tag.name);
                    for attr in &tag.attributes {
                        buf.push(' ');
                        buf.push_str(&attr.name);
                        buf.push_str("=\"");
                        escape(&attr.value, &mut buf);
                        buf.push('"');
                    }
                    if tag.first_child.is_none() {
                        buf.push_str("/>");
                    } else {
                        buf.push('>');
                    }
                }
                VisitorStep::EndTag(tag) => {
                    if tag.first_child.is_some() {
                        buf.push_str("</");
                        buf.push_str(&tag.name);
                        buf.push('>');
                    }
                }
                VisitorStep::CData(cdata) => {
                    escape(cdata, &mut buf);
                }
            }
        }

        buf
    }
}

impl Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cursor ({:?})", self.node)
    }
}

impl std::fmt::Display for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut visitor = self.visitor();
        while let Some(step) = visitor.next() {
            match step {
                VisitorStep::StartTag(tag) => {
                    f.write_str("<")?;
                    f.write_str(&tag.name)?;
                    for attr in &tag.attributes {
                        f.write_str(" ")?;
                        f.write_str(&attr.name)?;
                        f.write_str("=\"")?;
                        escape_fmt(&attr.value, f)?;
                        f.write_str("\"")?;
                    }
                    if tag.first_child.is_none() {
                        f.write_str("/>")?;
                    } else {
                        f.write_str(">")?;
                    }
                }
                VisitorStep::EndTag(tag) => {
                    if tag.first_child.is_some() {
                        f.write_str("</")?;
                        f.write_str(&tag.name)?;
                        f.write_str(">")?;
                    }
                }
                VisitorStep::CData(cdata) => {
                    escape_fmt(cdata, f)?;
                }
            }
        }

        Ok(())
    }
}


mod nocompile;
