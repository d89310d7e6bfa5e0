//! Contract between remote acquisition and the resolver that does the fetching
//!
//! Remote acquisition only decides *what* to ask for (one coordinate, every
//! repository, runtime scope, which cache). How the artifact is found and
//! transferred is up to the [`ArtifactResolver`] implementation.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::descriptor::DependencyCoordinate;
use crate::error::Result;

/// Which part of a coordinate's dependency graph a request covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyScope {
    /// The artifact itself plus its transitive runtime dependencies
    Runtime,
}

/// Username/password pair attached to one repository
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A repository as handed to the resolver, with credentials already attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub name: String,
    pub url: String,
    pub credentials: Option<Credentials>,
}

/// One resolution request: a single coordinate against all repositories
#[derive(Debug, Clone, Copy)]
pub struct ResolutionRequest<'a> {
    pub coordinate: &'a DependencyCoordinate,
    /// Eligible repositories, in configured order
    pub repositories: &'a [RemoteRepository],
    pub scope: DependencyScope,
    /// Artifact file extension, e.g. `so` or `jar`
    pub extension: &'a str,
    /// Persistent local cache shared across runs
    pub cache_dir: &'a Path,
}

/// Resolves one coordinate to files on disk
///
/// The first returned path must be the requested artifact itself; any further
/// paths are its dependencies in the order they should be layered.
pub trait ArtifactResolver {
    /// # Errors
    ///
    /// Returns an error when the artifact (or a required dependency of it)
    /// cannot be resolved from any repository.
    fn resolve(&self, request: &ResolutionRequest<'_>) -> Result<Vec<PathBuf>>;
}

/// Source of environment variables
///
/// Credential lookup goes through this so tests never mutate the process
/// environment.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
