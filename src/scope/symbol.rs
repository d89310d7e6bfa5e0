//! Resolved symbols and their exports

use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::OverrideScope;

/// Error type returned by a hosted entry function
pub type EntryError = Box<dyn std::error::Error + Send + Sync>;

/// Callable entry taking the scope it was resolved through and the original
/// invocation arguments
///
/// Further lookups made through the scope see the same layers, exclusions
/// and cache as the entry point itself.
pub type EntryFn = Arc<dyn Fn(&OverrideScope, &[String]) -> Result<(), EntryError> + Send + Sync>;

/// What a symbol name resolves to
#[derive(Clone)]
pub enum Export {
    /// An entry function that can be handed control
    Entry(EntryFn),
    /// Any other exported item
    Value(Arc<dyn Any + Send + Sync>),
}

impl Export {
    /// Wrap a closure as an entry export
    pub fn entry<F>(f: F) -> Self
    where
        F: Fn(&OverrideScope, &[String]) -> Result<(), EntryError> + Send + Sync + 'static,
    {
        Export::Entry(Arc::new(f))
    }

    pub fn value<V: Any + Send + Sync>(value: V) -> Self {
        Export::Value(Arc::new(value))
    }

    /// Short description of the export shape, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Export::Entry(_) => "entry",
            Export::Value(_) => "value",
        }
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Export::{}", self.kind())
    }
}

/// Which layer a symbol came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Host,
    Artifact(PathBuf),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Host => f.write_str("host"),
            Origin::Artifact(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A named export together with the layer that provided it
#[derive(Debug)]
pub struct Symbol {
    name: String,
    origin: Origin,
    export: Export,
}

impl Symbol {
    pub fn new(name: impl Into<String>, origin: Origin, export: Export) -> Self {
        Self {
            name: name.into(),
            origin,
            export,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn export(&self) -> &Export {
        &self.export
    }

    /// The entry function, if this symbol is callable
    pub fn as_entry(&self) -> Option<&EntryFn> {
        match &self.export {
            Export::Entry(f) => Some(f),
            Export::Value(_) => None,
        }
    }

    /// Downcast a value export
    pub fn downcast_value<V: Any>(&self) -> Option<&V> {
        match &self.export {
            Export::Value(v) => v.downcast_ref::<V>(),
            Export::Entry(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::SymbolTable;

    #[test]
    fn test_entry_symbol() {
        let symbol = Symbol::new(
            "demo::main",
            Origin::Host,
            Export::entry(|_, args| {
                assert_eq!(args, ["a".to_string()]);
                Ok(())
            }),
        );
        assert_eq!(symbol.export().kind(), "entry");
        let entry = symbol.as_entry().unwrap();
        let scope = OverrideScope::host_only(Arc::new(SymbolTable::new()));
        entry(&scope, &["a".to_string()]).unwrap();
        assert!(symbol.downcast_value::<u32>().is_none());
    }

    #[test]
    fn test_value_symbol() {
        let symbol = Symbol::new(
            "demo::VERSION",
            Origin::Artifact(PathBuf::from("/libs/demo-1.0.so")),
            Export::value(7u32),
        );
        assert!(symbol.as_entry().is_none());
        assert_eq!(symbol.downcast_value::<u32>(), Some(&7));
        assert_eq!(symbol.origin().to_string(), "/libs/demo-1.0.so");
    }
}
