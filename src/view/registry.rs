//! Renderer registry
//!
//! Renderers are looked up by key. Keys are checked when a renderer is
//! registered, so lookups only fail for keys nobody registered.

use super::{PathsRenderer, Renderer, TreeRenderer};
use crate::error::RegistryError;
use indexmap::IndexMap;
use tracing::debug;

/// Builds a fresh renderer
pub type RendererFactory = fn() -> Box<dyn Renderer>;

/// Registry of renderer factories, in registration order
#[derive(Debug, Clone, Default)]
pub struct RendererRegistry {
    factories: IndexMap<String, RendererFactory>,
}

fn tree() -> Box<dyn Renderer> {
    Box::new(TreeRenderer)
}

fn paths() -> Box<dyn Renderer> {
    Box::new(PathsRenderer)
}

impl RendererRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the `tree` and `paths` renderers
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .factories
            .insert(TreeRenderer::KEY.to_string(), tree);
        registry
            .factories
            .insert(PathsRenderer::KEY.to_string(), paths);
        registry
    }

    /// Register a factory under `key`
    pub fn register(&mut self, key: &str, factory: RendererFactory) -> Result<(), RegistryError> {
        if !is_valid_key(key) {
            return Err(RegistryError::InvalidKey(key.to_string()));
        }
        if self.factories.contains_key(key) {
            return Err(RegistryError::Duplicate(key.to_string()));
        }
        self.factories.insert(key.to_string(), factory);
        debug!(key, total = self.factories.len(), "registered renderer");
        Ok(())
    }

    /// Build the renderer registered under `key`
    pub fn create(&self, key: &str) -> Result<Box<dyn Renderer>, RegistryError> {
        self.factories
            .get(key)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::Unknown(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}
