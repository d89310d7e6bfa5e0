//! Bootstrap configuration
//!
//! Every setting resolves from three layers, first match wins:
//! 1. an override (command-line flag or its environment variable)
//! 2. an attribute of the package manifest
//! 3. a built-in default
//!
//! Empty override and attribute values count as absent.
//!
//! ## Module Organization
//!
//! - `manifest.rs`: `META-INF/MANIFEST.MF` parsing
//! - `paths.rs`: default cache directory and artifact extension

pub mod manifest;
pub mod paths;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{Result, config as config_error};
use crate::locator::DEFAULT_LIBRARY_PATH;

pub use manifest::PackageManifest;

/// Where artifacts are acquired from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyMode {
    /// Search the local library directory
    #[default]
    Local,
    /// Resolve through the configured repositories into the cache directory
    Remote,
}

impl fmt::Display for DependencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyMode::Local => f.write_str("local"),
            DependencyMode::Remote => f.write_str("remote"),
        }
    }
}

impl FromStr for DependencyMode {
    type Err = crate::error::RtdepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(DependencyMode::Local),
            "remote" => Ok(DependencyMode::Remote),
            other => Err(config_error::invalid(format!(
                "unknown dependency mode '{other}' (expected 'local' or 'remote')"
            ))),
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub entry_point: Option<String>,
    pub library_path: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub mode: Option<DependencyMode>,
    pub extension: Option<String>,
    pub no_default_repository: bool,
}

/// Effective configuration of one bootstrap run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapConfig {
    pub entry_point: Option<String>,
    pub mode: DependencyMode,
    pub library_path: PathBuf,
    pub cache_dir: Option<PathBuf>,
    pub extension: String,
    pub default_repository: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            entry_point: None,
            mode: DependencyMode::Local,
            library_path: PathBuf::from(DEFAULT_LIBRARY_PATH),
            cache_dir: None,
            extension: paths::default_extension().to_string(),
            default_repository: true,
        }
    }
}

impl BootstrapConfig {
    /// Merge overrides over manifest attributes over defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest names an unknown dependency mode.
    pub fn resolve(overrides: &Overrides, manifest: &PackageManifest) -> Result<Self> {
        let defaults = Self::default();

        let entry_point = non_empty(overrides.entry_point.as_deref())
            .or_else(|| manifest.get(manifest::ENTRY_POINT_ATTRIBUTE))
            .map(str::to_string);

        let mode = match overrides.mode {
            Some(mode) => mode,
            None => manifest
                .get(manifest::MODE_ATTRIBUTE)
                .map(<DependencyMode as FromStr>::from_str)
                .transpose()?
                .unwrap_or(defaults.mode),
        };

        let library_path = non_empty_path(overrides.library_path.as_ref())
            .or_else(|| manifest.get(manifest::LIBRARY_PATH_ATTRIBUTE).map(PathBuf::from))
            .unwrap_or(defaults.library_path);

        let cache_dir = non_empty_path(overrides.cache_dir.as_ref())
            .or_else(|| manifest.get(manifest::CACHE_DIR_ATTRIBUTE).map(PathBuf::from));

        let extension = non_empty(overrides.extension.as_deref())
            .or_else(|| manifest.get(manifest::EXTENSION_ATTRIBUTE))
            .map(|ext| ext.trim_start_matches('.').to_string())
            .unwrap_or(defaults.extension);

        Ok(Self {
            entry_point,
            mode,
            library_path,
            cache_dir,
            extension,
            default_repository: !overrides.no_default_repository,
        })
    }

    /// Configured cache directory, or `$HOME/.runtime-dependencies`
    ///
    /// # Errors
    ///
    /// Returns an error if no cache directory is configured and the home
    /// directory cannot be determined.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => paths::default_cache_dir(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_path(value: Option<&PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty()).cloned()
}
