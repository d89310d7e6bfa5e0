//! Host layer: symbols already visible to the launching process
//!
//! A Rust host has no reflective view of its own items, so the hosted
//! application registers what it exposes in a [`SymbolTable`] before handing
//! it to the bootstrapper.

use std::collections::HashMap;
use std::sync::Arc;

use super::OverrideScope;
use super::symbol::{EntryError, Export, Origin, Symbol};

/// The fallback layer of a resolution scope
pub trait HostScope: Send + Sync {
    /// Look up `name`; the same `Arc` should be returned for repeated lookups
    fn resolve(&self, name: &str) -> Option<Arc<Symbol>>;
}

/// Explicitly populated host symbols
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Arc<Symbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an export under `name`, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, export: Export) -> &mut Self {
        let name = name.into();
        let symbol = Arc::new(Symbol::new(name.clone(), Origin::Host, export));
        self.symbols.insert(name, symbol);
        self
    }

    /// Register an entry function under `name`
    pub fn register_entry<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&OverrideScope, &[String]) -> Result<(), EntryError> + Send + Sync + 'static,
    {
        self.register(name, Export::entry(f))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl HostScope for SymbolTable {
    fn resolve(&self, name: &str) -> Option<Arc<Symbol>> {
        self.symbols.get(name).cloned()
    }
}
