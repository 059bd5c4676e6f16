/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use quick_xml::NsReader;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::events::attributes::AttrError;
use quick_xml::name::Namespace;
use quick_xml::name::ResolveResult;

use super::Attribute;
use super::Document;
use super::DocumentError;
use super::NodePayload;
use super::Tag;
use super::error::description;
use super::factory::FactoryConfig;

fn is_whitespace(text: &str) -> bool {
    text.chars()
        .all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

fn owned_namespace(resolved: ResolveResult<'_>) -> Result<Option<String>, DocumentError> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(std::str::from_utf8(uri)?.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(_) => Err(DocumentError::BadXml(description::UNBOUND_PREFIX)),
    }
}

fn owned_attributes(start: &BytesStart<'_>) -> Result<Vec<Attribute>, DocumentError> {
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = match attribute {
            Ok(attribute) => attribute,
            Err(AttrError::Duplicated(_, _)) => {
                return Err(DocumentError::BadXml(description::DUPLICATE_ATTRIBUTE));
            }
            Err(_) => return Err(DocumentError::BadXml(description::MALFORMED_ATTRIBUTE)),
        };
        let name = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute.unescape_value()?.into_owned();
        attributes.push(Attribute { name, value });
    }
    Ok(attributes)
}

/// Builds a [Document] from parser events.
pub(super) struct DocumentBuilder<'c> {
    config: &'c FactoryConfig,
    doc: Option<Document>,
    node: Option<u32>,
    depth: usize,
}

impl<'c> DocumentBuilder<'c> {
    pub(super) fn new(config: &'c FactoryConfig) -> Self {
        DocumentBuilder {
            config,
            doc: None,
            node: None,
            depth: 0,
        }
    }

    fn start_tag(
        &mut self,
        start: &BytesStart<'_>,
        namespace: Option<String>,
    ) -> Result<(), DocumentError> {
        if self.depth >= self.config.max_depth {
            return Err(DocumentError::BadXml(description::TOO_DEEP));
        }
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();
        let attributes = owned_attributes(start)?;
        match (&mut self.doc, self.node) {
            (None, _) => {
                let mut doc = Document::empty(&name)?;
                let root = doc.root;
                let tag = doc.tag_mut(root);
                tag.attributes = attributes;
                tag.namespace = namespace;
                self.node = Some(root);
                self.doc = Some(doc);
            }
            (Some(doc), Some(parent)) => {
                let mut tag = Tag::new(&name, namespace);
                tag.attributes = attributes;
                let new = doc.alloc_node(NodePayload::Tag(tag))?;
                doc.link_last(parent, new);
                self.node = Some(new);
            }
            (Some(_), None) => return Err(DocumentError::BadXml(description::MULTIPLE_ROOTS)),
        }
        self.depth += 1;
        Ok(())
    }

    fn end_tag(&mut self) {
        if let (Some(doc), Some(node)) = (&self.doc, self.node) {
            self.node = doc.node(node).parent;
            self.depth -= 1;
        }
    }

    fn cdata(&mut self, text: &str, is_section: bool) -> Result<(), DocumentError> {
        if text.is_empty() {
            return Ok(());
        }
        let whitespace = !is_section && is_whitespace(text);
        match (&mut self.doc, self.node) {
            (Some(doc), Some(node)) => {
                if whitespace && self.config.ignore_whitespace {
                    return Ok(());
                }
                doc.cursor_at(node).insert_cdata(text)?;
                Ok(())
            }
            _ if whitespace => Ok(()),
            _ => Err(DocumentError::BadXml(description::TEXT_OUTSIDE_ROOT)),
        }
    }

    fn finish(self) -> Result<Document, DocumentError> {
        if self.depth > 0 {
            return Err(DocumentError::BadXml(description::UNCLOSED_TAGS));
        }
        self.doc
            .ok_or(DocumentError::BadXml(description::NO_DOCUMENT))
    }
}

/// Parses a complete XML document with namespace resolution.
pub(super) fn parse_str(text: &str, config: &FactoryConfig) -> Result<Document, DocumentError> {
    let mut reader = NsReader::from_str(text);
    let mut builder = DocumentBuilder::new(config);
    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        let namespace = owned_namespace(resolved)?;
        match event {
            Event::Start(start) => builder.start_tag(&start, namespace)?,
            Event::Empty(start) => {
                builder.start_tag(&start, namespace)?;
                builder.end_tag();
            }
            Event::End(_) => builder.end_tag(),
            Event::Text(text) => builder.cdata(&text.unescape()?, false)?,
            Event::CData(cdata) => {
                let bytes = cdata.into_inner();
                builder.cdata(std::str::from_utf8(&bytes)?, true)?;
            }
            Event::Eof => break,
            // Comments, declarations and processing instructions carry no content
            _ => {}
        }
    }
    builder.finish()
}
