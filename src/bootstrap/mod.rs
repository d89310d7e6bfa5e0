//! Bootstrap orchestration
//!
//! A run goes through five steps:
//! 1. require an entry point name
//! 2. parse the dependency descriptor
//! 3. acquire artifacts (local directory search or remote resolution)
//! 4. build an [`OverrideScope`] over the acquired artifacts and the host
//! 5. resolve the entry point through the scope and hand control to it
//!
//! Everything a run needs is carried by a [`BootstrapContext`]; nothing is
//! installed process-wide.
//!
//! ## Module Organization
//!
//! - `package.rs`: on-disk package layout (manifest and descriptor)

pub mod package;

use std::sync::Arc;

use crate::artifact::{ResolvedArtifact, locations};
use crate::config::{BootstrapConfig, DependencyMode};
use crate::descriptor::{RepositoryDescriptor, RuntimeDescriptor};
use crate::error::{RtdepError, Result, entry as entry_error};
use crate::locator;
use crate::remote::{ArtifactResolver, Environment, RemoteArtifactResolver, with_default_repository};
use crate::scope::{ArtifactLoader, ExclusionSet, HostScope, OverrideScope};

pub use package::Package;

/// Everything one bootstrap run depends on
pub struct BootstrapContext {
    pub config: BootstrapConfig,
    pub host: Arc<dyn HostScope>,
    pub loader: Arc<dyn ArtifactLoader>,
    pub env: Box<dyn Environment>,
    pub resolver: Box<dyn ArtifactResolver>,
}

/// Acquires runtime dependencies and hands control to the entry point
pub struct Bootstrapper {
    context: BootstrapContext,
    descriptor_text: Option<String>,
}

impl Bootstrapper {
    pub fn new(context: BootstrapContext) -> Self {
        Self {
            context,
            descriptor_text: None,
        }
    }

    /// Use `text` as the dependency descriptor
    #[must_use]
    pub fn with_descriptor(mut self, text: Option<String>) -> Self {
        self.descriptor_text = text;
        self
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.context.config
    }

    /// Run the bootstrap and invoke `entry_point` with `args` unchanged
    ///
    /// # Errors
    ///
    /// Returns an error if no entry point is given, remote acquisition fails,
    /// or the entry point cannot be resolved, is not callable, or fails.
    pub fn run(&self, entry_point: Option<&str>, args: &[String]) -> Result<()> {
        let entry_point = entry_point
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(RtdepError::MissingEntryPoint)?;

        self.log_banner(entry_point);

        let descriptor = self.descriptor();
        let artifacts = self.acquire(&descriptor)?;
        tracing::info!("acquired {} artifacts", artifacts.len());

        let scope = self.build_scope(&artifacts)?;
        self.invoke(&scope, entry_point, args)
    }

    /// Parsed descriptor; absent text is an empty descriptor
    pub fn descriptor(&self) -> RuntimeDescriptor {
        self.descriptor_text
            .as_deref()
            .map(RuntimeDescriptor::parse)
            .unwrap_or_default()
    }

    /// Repositories remote acquisition will use, default repository included
    pub fn repositories(&self, descriptor: &RuntimeDescriptor) -> Vec<RepositoryDescriptor> {
        if self.context.config.default_repository {
            with_default_repository(&descriptor.repositories)
        } else {
            descriptor.repositories.clone()
        }
    }

    /// Acquire the descriptor's artifacts in the configured mode
    ///
    /// # Errors
    ///
    /// Returns the first remote resolution failure. Local mode never fails.
    pub fn acquire(&self, descriptor: &RuntimeDescriptor) -> Result<Vec<ResolvedArtifact>> {
        let config = &self.context.config;
        if descriptor.dependencies.is_empty() {
            tracing::info!("no runtime dependencies declared");
            return Ok(Vec::new());
        }

        match config.mode {
            DependencyMode::Local => Ok(locator::acquire(
                &config.library_path,
                &descriptor.dependencies,
                &config.extension,
            )),
            DependencyMode::Remote => {
                let cache_dir = config.cache_dir()?;
                let remote = RemoteArtifactResolver::new(
                    self.context.resolver.as_ref(),
                    self.context.env.as_ref(),
                    config.extension.as_str(),
                );
                remote.resolve(
                    &descriptor.dependencies,
                    &self.repositories(descriptor),
                    &cache_dir,
                )
            }
        }
    }

    /// Names the scope must always answer from the host
    pub fn exclusions(&self) -> ExclusionSet {
        match self.context.config.mode {
            DependencyMode::Local => ExclusionSet::platform(),
            DependencyMode::Remote => ExclusionSet::platform().with_resolver_namespaces(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if an acquired location is not a readable file.
    pub fn build_scope(&self, artifacts: &[ResolvedArtifact]) -> Result<OverrideScope> {
        OverrideScope::new(
            locations(artifacts),
            Arc::clone(&self.context.host),
            Arc::clone(&self.context.loader),
            self.exclusions(),
        )
    }

    fn invoke(&self, scope: &OverrideScope, entry_point: &str, args: &[String]) -> Result<()> {
        let symbol = scope.resolve(entry_point).map_err(|e| match e {
            RtdepError::SymbolNotFound { .. } => entry_error::not_found(entry_point),
            other => other,
        })?;

        let entry = symbol
            .as_entry()
            .ok_or_else(|| entry_error::shape(entry_point, symbol.export().kind()))?;

        tracing::info!(entry_point, origin = %symbol.origin(), "starting application");
        entry(scope, args).map_err(|e| entry_error::failed(entry_point, e.to_string()))
    }

    fn log_banner(&self, entry_point: &str) {
        let config = &self.context.config;
        tracing::info!("=== Runtime Dependency Bootstrap ===");
        tracing::info!(mode = %config.mode, "dependency mode");
        match config.mode {
            DependencyMode::Local => {
                tracing::info!(library_path = %config.library_path.display(), "library path");
            }
            DependencyMode::Remote => match config.cache_dir() {
                Ok(dir) => tracing::info!(cache_dir = %dir.display(), "cache directory"),
                Err(e) => tracing::warn!("cache directory unavailable: {e}"),
            },
        }
        tracing::info!(entry_point, "entry point");
    }
}
