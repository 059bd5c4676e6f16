/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::sync::OnceLock;

use tracing::debug;

use super::Cursor;
use super::Document;
use super::DocumentError;
use super::builder::parse_str;
use super::error::description;

static GLOBAL_FACTORY: OnceLock<DocumentFactory> = OnceLock::new();

/// Parser settings shared by every document the factory produces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FactoryConfig {
    /// Drop text nodes consisting only of whitespace.
    pub ignore_whitespace: bool,
    /// Maximum element nesting accepted by the parser.
    pub max_depth: usize,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        FactoryConfig {
            ignore_whitespace: true,
            max_depth: 256,
        }
    }
}

/// Produces documents, either empty or parsed from text.
///
/// A process-wide instance is available through [DocumentFactory::global].
/// It is created lazily with the default configuration unless
/// [DocumentFactory::install] is called first.
#[derive(Debug)]
pub struct DocumentFactory {
    config: FactoryConfig,
}

impl DocumentFactory {
    pub fn new(config: FactoryConfig) -> Result<DocumentFactory, DocumentError> {
        if config.max_depth == 0 {
            return Err(DocumentError::Configuration(description::ZERO_DEPTH));
        }
        Ok(DocumentFactory { config })
    }

    /// Sets the configuration of the global factory. Fails if the global
    /// factory was already installed or used.
    pub fn install(config: FactoryConfig) -> Result<&'static DocumentFactory, DocumentError> {
        let factory = DocumentFactory::new(config)?;
        GLOBAL_FACTORY
            .set(factory)
            .map_err(|_| DocumentError::Configuration(description::ALREADY_INSTALLED))?;
        debug!("installed global document factory");
        Ok(Self::global())
    }

    pub fn global() -> &'static DocumentFactory {
        GLOBAL_FACTORY.get_or_init(|| DocumentFactory {
            config: FactoryConfig::default(),
        })
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn create(
        &self,
        qualified_name: &str,
        namespace: Option<&str>,
    ) -> Result<Document, DocumentError> {
        Document::with_namespace(qualified_name, namespace)
    }

    pub fn parse(&self, text: &str) -> Result<Document, DocumentError> {
        let result = parse_str(text, &self.config);
        if let Err(err) = &result {
            debug!(bytes = text.len(), "cannot parse document: {err}");
        }
        result
    }

    /// Deep copies an element into a new document.
    pub fn import(&self, source: Cursor<'_>) -> Result<Document, DocumentError> {
        debug!(element = source.name(), "importing element");
        Document::import(source)
    }
}
