//! Static registration table from handler names to handler functions.

use std::collections::HashMap;

use super::{HandlerFn, RouteLoadError};
use crate::application::controllers::movie_controller;

/// Handler names the route file may refer to.
///
/// Each entity module adds its handlers explicitly; names are resolved once
/// when the route table is loaded.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<&'static str, HandlerFn>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every handler shipped with the service.
    ///
    /// # Errors
    ///
    /// Returns [`RouteLoadError::DuplicateHandler`] if two modules claim the same name.
    pub fn builtin() -> Result<Self, RouteLoadError> {
        let mut registry = Self::new();
        movie_controller::register(&mut registry)?;
        Ok(registry)
    }

    /// Registers `handler` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteLoadError::DuplicateHandler`] if `name` is already registered.
    pub fn register(
        &mut self,
        name: &'static str,
        handler: HandlerFn,
    ) -> Result<&mut Self, RouteLoadError> {
        if self.handlers.contains_key(name) {
            return Err(RouteLoadError::DuplicateHandler(name.to_string()));
        }

        self.handlers.insert(name, handler);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<HandlerFn> {
        self.handlers.get(name).copied()
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
