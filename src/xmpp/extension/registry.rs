/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::OnceLock;

use tracing::debug;
use tracing::trace;
use tracing::warn;

use super::Extension;
use super::PacketExtension;
use crate::Cursor;
use crate::Ns;
use crate::xmpp::DataForm;
use crate::xmpp::XmlElement;
use crate::xmpp::XmppError;
use crate::xmpp::constants::DATA_FORMS_NS;
use crate::xmpp::error::description;
use crate::xmpp::forms::FORM_TAG;

static GLOBAL_REGISTRY: OnceLock<ExtensionRegistry> = OnceLock::new();

/// Turns a copy of an extension element into its typed view.
pub type ExtensionFactory =
    Arc<dyn Fn(PacketExtension) -> Result<Extension, XmppError> + Send + Sync>;

fn data_form_factory(extension: PacketExtension) -> Result<Extension, XmppError> {
    Ok(Extension::Form(DataForm::from_element(extension.element())?))
}

/// Maps namespaced element names to extension factories.
///
/// Packets resolve their extensions through the global registry, which
/// is created lazily with [ExtensionRegistry::with_defaults] unless
/// [ExtensionRegistry::install] is called first.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    factories: HashMap<(String, String), ExtensionFactory>,
}

impl ExtensionRegistry {
    /// Creates an empty registry.
    pub fn new() -> ExtensionRegistry {
        ExtensionRegistry::default()
    }

    /// Creates a registry with the factories for the extensions this
    /// crate knows about.
    pub fn with_defaults() -> ExtensionRegistry {
        let mut registry = ExtensionRegistry::new();
        registry.register(FORM_TAG, DATA_FORMS_NS, Arc::new(data_form_factory));
        registry
    }

    /// Registers a factory, replacing any previous one for the same
    /// element name and namespace.
    pub fn register(&mut self, name: &str, namespace: &str, factory: ExtensionFactory) {
        self.factories
            .insert((namespace.to_string(), name.to_string()), factory);
    }

    pub fn unregister(&mut self, name: &str, namespace: &str) -> bool {
        self.factories
            .remove(&(namespace.to_string(), name.to_string()))
            .is_some()
    }

    pub fn is_registered(&self, name: &str, namespace: &str) -> bool {
        self.factories
            .contains_key(&(namespace.to_string(), name.to_string()))
    }

    /// Makes the registry the global one. Fails if the global registry
    /// was already installed or used.
    pub fn install(registry: ExtensionRegistry) -> Result<&'static ExtensionRegistry, XmppError> {
        GLOBAL_REGISTRY
            .set(registry)
            .map_err(|_| XmppError::InvariantViolation(description::REGISTRY_INSTALLED))?;
        debug!("installed global extension registry");
        Ok(Self::global())
    }

    pub fn global() -> &'static ExtensionRegistry {
        GLOBAL_REGISTRY.get_or_init(ExtensionRegistry::with_defaults)
    }

    /// Looks for a direct child of the host with the name and namespace
    /// and returns a typed copy of it.
    ///
    /// Unregistered elements come back as [Extension::Generic]. A factory
    /// which fails is logged and treated as if the element was missing.
    pub fn extension_for(&self, host: Cursor<'_>, name: &str, namespace: &str) -> Option<Extension> {
        let child = host.find_element(name, Ns::Uri(namespace));
        if child.is_null() {
            return None;
        }
        let extension = match PacketExtension::from_element(child) {
            Ok(extension) => extension,
            Err(err) => {
                warn!(element = name, namespace, "cannot copy extension element: {err}");
                return None;
            }
        };
        let Some(factory) = self
            .factories
            .get(&(namespace.to_string(), name.to_string()))
        else {
            return Some(Extension::Generic(extension));
        };
        trace!(element = name, namespace, "found registered extension factory");
        match factory(extension) {
            Ok(typed) => Some(typed),
            Err(err) => {
                let err = XmppError::ExtensionConstruction {
                    name: name.to_string(),
                    namespace: namespace.to_string(),
                    reason: err.to_string(),
                };
                warn!("{err}");
                None
            }
        }
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.factories.keys().collect();
        keys.sort();
        f.debug_struct("ExtensionRegistry")
            .field("factories", &keys)
            .finish()
    }
}
