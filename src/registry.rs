//! Registry of type handlers and external loaders.
//!
//! Lookup order for a type tag is fixed: built-in handler, then an external loader
//! registered for that exact tag, then the wildcard loader, then nothing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use phid_types::{PhidType, PhidTypeError};
use serde_json::{Map, Value};

use crate::config::HandleConfig;
use crate::error::{HandleError, HandleResult};
use crate::handler::{builtin, LoaderFactory, ObjectHandleLoader, TypeHandler};

/// Key of an external loader entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoaderKey {
    Exact(PhidType),
    /// `*`: consulted for any type with no built-in handler and no exact entry.
    Wildcard,
}

impl FromStr for LoaderKey {
    type Err = PhidTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            Ok(Self::Wildcard)
        } else {
            s.parse().map(Self::Exact)
        }
    }
}

impl fmt::Display for LoaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(phid_type) => write!(f, "{phid_type}"),
            Self::Wildcard => f.write_str("*"),
        }
    }
}

/// External loader entry: the factory kind plus the options handed to it.
#[derive(Debug, Clone)]
pub struct ExternalLoader {
    pub key: LoaderKey,
    pub kind: String,
    pub options: Value,
}

/// Outcome of looking up a type tag.
pub enum Resolution<'a> {
    Builtin(&'a Arc<dyn TypeHandler>),
    External(&'a ExternalLoader),
    NotFound,
}

pub struct HandlerRegistry {
    /// Built-in handlers keyed by the type they own.
    handlers: HashMap<PhidType, Arc<dyn TypeHandler>>,
    /// External loader entries.
    external: HashMap<LoaderKey, ExternalLoader>,
    /// Loader factories keyed by kind.
    factories: HashMap<&'static str, Arc<dyn LoaderFactory>>,
}

impl HandlerRegistry {
    /// Creates a registry holding only the magic-value handler.
    pub fn new() -> Self {
        let mut handlers = HashMap::new();
        let magic = builtin::magic();
        handlers.insert(magic.phid_type(), magic);
        Self {
            handlers,
            external: HashMap::new(),
            factories: HashMap::new(),
        }
    }

    /// Initialise the registry with a predefined list of handlers.
    pub fn with_handlers(handlers: Vec<Arc<dyn TypeHandler>>) -> HandleResult<Self> {
        let mut registry = Self::new();
        for handler in handlers {
            registry.register(handler)?;
        }
        Ok(registry)
    }

    /// Register a built-in handler, rejecting a second handler for the same type.
    pub fn register(&mut self, handler: Arc<dyn TypeHandler>) -> HandleResult<()> {
        let phid_type = handler.phid_type();
        if let Some(existing) = self.handlers.get(&phid_type) {
            return Err(HandleError::DuplicateHandler {
                name: handler.name(),
                phid_type,
                existing: existing.name(),
            });
        }

        tracing::info!(
            target: "phid_handles::registry",
            handler = handler.name(),
            phid_type = %phid_type,
            "registered handler"
        );
        self.handlers.insert(phid_type, handler);
        Ok(())
    }

    pub fn register_factory(&mut self, factory: Arc<dyn LoaderFactory>) {
        tracing::debug!(
            target: "phid_handles::registry",
            kind = factory.kind(),
            "registered loader factory"
        );
        self.factories.insert(factory.kind(), factory);
    }

    /// Adds an external loader entry. A later entry for the same key replaces the earlier.
    pub fn register_external(&mut self, key: LoaderKey, kind: impl Into<String>, options: Value) {
        let kind = kind.into();
        tracing::info!(
            target: "phid_handles::registry",
            key = %key,
            kind = %kind,
            "registered external loader"
        );
        self.external.insert(key, ExternalLoader { key, kind, options });
    }

    pub fn lookup(&self, phid_type: PhidType) -> Resolution<'_> {
        if let Some(handler) = self.handlers.get(&phid_type) {
            return Resolution::Builtin(handler);
        }
        self.external
            .get(&LoaderKey::Exact(phid_type))
            .or_else(|| self.external.get(&LoaderKey::Wildcard))
            .map_or(Resolution::NotFound, Resolution::External)
    }

    pub fn handler(&self, phid_type: PhidType) -> Option<&Arc<dyn TypeHandler>> {
        self.handlers.get(&phid_type)
    }

    /// Types with a built-in handler.
    pub fn builtin_types(&self) -> impl Iterator<Item = PhidType> + '_ {
        self.handlers.keys().copied()
    }

    /// Builds the loader for an external entry through its factory.
    pub async fn instantiate(
        &self,
        loader: &ExternalLoader,
    ) -> HandleResult<Arc<dyn ObjectHandleLoader>> {
        let factory =
            self.factories
                .get(loader.kind.as_str())
                .ok_or_else(|| HandleError::UnknownLoader {
                    key: loader.key.to_string(),
                    kind: loader.kind.clone(),
                })?;

        factory
            .create(&loader.options)
            .await
            .map_err(|e| HandleError::InvalidLoader {
                key: loader.key.to_string(),
                kind: loader.kind.clone(),
                reason: format!("{e:#}"),
            })
    }

    /// Instantiates every external entry once, surfacing misconfiguration up front.
    pub async fn validate(&self) -> HandleResult<()> {
        for loader in self.external.values() {
            self.instantiate(loader).await?;
        }
        Ok(())
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a [`HandlerRegistry`] from configuration.
///
/// Every configured external loader is instantiated once before returning, so a
/// missing factory or a rejected entry fails here rather than on first use.
pub async fn from_config(
    config: &HandleConfig,
    handlers: Vec<Arc<dyn TypeHandler>>,
    factories: Vec<Arc<dyn LoaderFactory>>,
) -> HandleResult<HandlerRegistry> {
    let mut registry = HandlerRegistry::with_handlers(handlers)?;
    for factory in factories {
        registry.register_factory(factory);
    }

    tracing::info!(
        target: "phid_handles::registry",
        count = config.external_loaders.len(),
        "loading external loaders from config"
    );

    for (name, value) in &config.external_loaders {
        let key = name
            .parse::<LoaderKey>()
            .map_err(|source| HandleError::InvalidLoaderKey {
                key: name.clone(),
                source,
            })?;
        let (kind, options) = extract_kind(name, value)?;
        registry.register_external(key, kind, options);
    }

    registry.validate().await?;
    Ok(registry)
}

/// Splits an entry into its kind and the options handed to the factory.
///
/// A bare string names the kind and carries no options; a table names it in `type`.
fn extract_kind(name: &str, value: &Value) -> HandleResult<(String, Value)> {
    match value {
        Value::String(kind) => Ok((kind.clone(), Value::Object(Map::new()))),
        Value::Object(map) => {
            let mut map = map.clone();
            let kind = map
                .remove("type")
                .and_then(|v| v.as_str().map(str::to_owned))
                .ok_or_else(|| HandleError::InvalidLoaderEntry(name.to_string()))?;
            Ok((kind, Value::Object(map)))
        }
        _ => Err(HandleError::InvalidLoaderEntry(name.to_string())),
    }
}
