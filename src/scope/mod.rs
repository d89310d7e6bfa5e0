//! Layered symbol resolution
//!
//! An [`OverrideScope`] answers symbol lookups from two layers: the artifacts
//! acquired for this run (own layer) and the host process (host layer). For
//! each name, first match wins:
//!
//! 1. a previously resolved result for the name
//! 2. names in the [`ExclusionSet`] go to the host, unconditionally
//! 3. own artifacts, in the order they were acquired
//! 4. the host
//!
//! The exclusion check comes before the own layer so an acquired artifact can
//! never shadow platform items or the bootstrapper's own symbols.
//!
//! ## Module Organization
//!
//! - `symbol.rs`: `Symbol`, `Export`, `Origin`
//! - `host.rs`: `HostScope` and the explicitly populated `SymbolTable`
//! - `module.rs`: artifact modules and loaders (dynamic and static)

pub mod host;
pub mod module;
pub mod symbol;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::artifact::is_readable_file;
use crate::error::{RtdepError, Result};

pub use host::{HostScope, SymbolTable};
pub use module::{ArtifactLoader, ArtifactModule, DylibLoader, StaticLoader, StaticModule};
pub use symbol::{EntryError, EntryFn, Export, Origin, Symbol};

/// Namespaces of the platform itself
pub const PLATFORM_PREFIXES: &[&str] = &["std::", "core::", "alloc::", "proc_macro::"];

/// Namespaces of the libraries remote resolution runs on
pub const RESOLVER_PREFIXES: &[&str] = &["reqwest::", "hyper::", "rustls::", "url::"];

/// Exact names belonging to the launcher itself
pub const BOOTSTRAP_SELF_NAMES: &[&str] = &[
    "main",
    "rtdep::bootstrap::Bootstrapper",
    "rtdep::scope::OverrideScope",
];

/// Names that must always be answered by the host layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    prefixes: Vec<String>,
    names: HashSet<String>,
}

impl ExclusionSet {
    /// Empty set; nothing is excluded
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform namespaces plus the launcher's own names
    pub fn platform() -> Self {
        let mut set = Self::new();
        for prefix in PLATFORM_PREFIXES {
            set = set.with_prefix(*prefix);
        }
        for name in BOOTSTRAP_SELF_NAMES {
            set = set.with_name(*name);
        }
        set
    }

    /// Add the resolver library namespaces, used in remote mode
    #[must_use]
    pub fn with_resolver_namespaces(mut self) -> Self {
        for prefix in RESOLVER_PREFIXES {
            self = self.with_prefix(*prefix);
        }
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    pub fn matches(&self, name: &str) -> bool {
        self.names.contains(name) || self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}

/// One acquired artifact, opened on first use
struct OwnLayer {
    location: PathBuf,
    module: OnceLock<std::result::Result<Box<dyn ArtifactModule>, String>>,
}

type Slot = Arc<Mutex<Option<Arc<Symbol>>>>;

/// Child-first resolution scope over acquired artifacts and the host
pub struct OverrideScope {
    own: Vec<OwnLayer>,
    host: Arc<dyn HostScope>,
    loader: Arc<dyn ArtifactLoader>,
    exclusions: ExclusionSet,
    resolved: Mutex<HashMap<String, Slot>>,
}

impl OverrideScope {
    /// Build a scope over `locations`, in precedence order
    ///
    /// # Errors
    ///
    /// Returns [`RtdepError::ArtifactMissing`] if a location is not a
    /// readable file.
    pub fn new(
        locations: Vec<PathBuf>,
        host: Arc<dyn HostScope>,
        loader: Arc<dyn ArtifactLoader>,
        exclusions: ExclusionSet,
    ) -> Result<Self> {
        let own = locations
            .into_iter()
            .map(|location| {
                if is_readable_file(&location) {
                    Ok(OwnLayer {
                        location,
                        module: OnceLock::new(),
                    })
                } else {
                    Err(RtdepError::ArtifactMissing {
                        path: location.display().to_string(),
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            own,
            host,
            loader,
            exclusions,
            resolved: Mutex::new(HashMap::new()),
        })
    }

    /// Scope with no own artifacts; every lookup goes to the host
    pub fn host_only(host: Arc<dyn HostScope>) -> Self {
        Self {
            own: Vec::new(),
            host,
            loader: Arc::new(StaticLoader::new()),
            exclusions: ExclusionSet::new(),
            resolved: Mutex::new(HashMap::new()),
        }
    }

    /// Locations of the own layer, in precedence order
    pub fn locations(&self) -> impl Iterator<Item = &Path> {
        self.own.iter().map(|layer| layer.location.as_path())
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Resolve `name`, caching the result
    ///
    /// Concurrent calls for the same name are serialized and all observe the
    /// same `Arc`.
    ///
    /// # Errors
    ///
    /// Returns [`RtdepError::SymbolNotFound`] if no layer provides `name`, or
    /// [`RtdepError::ArtifactLoadFailed`] if an own artifact cannot be opened.
    pub fn resolve(&self, name: &str) -> Result<Arc<Symbol>> {
        let slot = {
            let mut resolved = self.resolved.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(resolved.entry(name.to_string()).or_default())
        };

        let mut cached = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(symbol) = cached.as_ref() {
            return Ok(Arc::clone(symbol));
        }

        match self.resolve_uncached(name) {
            Ok(symbol) => {
                *cached = Some(Arc::clone(&symbol));
                Ok(symbol)
            }
            Err(e) => {
                drop(cached);
                self.forget_unfilled(name, &slot);
                Err(e)
            }
        }
    }

    /// Drop the slot of a failed resolution unless another caller holds or
    /// has filled it
    fn forget_unfilled(&self, name: &str, slot: &Slot) {
        let mut resolved = self.resolved.lock().unwrap_or_else(PoisonError::into_inner);
        let unfilled = resolved.get(name).is_some_and(|current| Arc::ptr_eq(current, slot))
            && slot.try_lock().is_ok_and(|cached| cached.is_none());
        if unfilled {
            resolved.remove(name);
        }
    }

    fn resolve_uncached(&self, name: &str) -> Result<Arc<Symbol>> {
        if self.exclusions.matches(name) {
            tracing::trace!(symbol = name, "excluded, delegating to host");
            return self.from_host(name);
        }

        for layer in &self.own {
            if let Some(export) = self.module(layer)?.lookup(name) {
                tracing::debug!(symbol = name, artifact = %layer.location.display(), "resolved from artifact");
                return Ok(Arc::new(Symbol::new(
                    name,
                    Origin::Artifact(layer.location.clone()),
                    export,
                )));
            }
        }

        self.from_host(name)
    }

    fn from_host(&self, name: &str) -> Result<Arc<Symbol>> {
        self.host
            .resolve(name)
            .ok_or_else(|| RtdepError::SymbolNotFound {
                name: name.to_string(),
            })
    }

    fn module<'a>(&self, layer: &'a OwnLayer) -> Result<&'a dyn ArtifactModule> {
        let loaded = layer.module.get_or_init(|| {
            self.loader.load(&layer.location).map_err(|e| match e {
                RtdepError::ArtifactLoadFailed { reason, .. } => reason,
                other => other.to_string(),
            })
        });
        match loaded {
            Ok(module) => Ok(module.as_ref()),
            Err(reason) => Err(RtdepError::ArtifactLoadFailed {
                path: layer.location.display().to_string(),
                reason: reason.clone(),
            }),
        }
    }
}

impl HostScope for OverrideScope {
    fn resolve(&self, name: &str) -> Option<Arc<Symbol>> {
        OverrideScope::resolve(self, name).ok()
    }
}
