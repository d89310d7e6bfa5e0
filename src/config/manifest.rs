//! Package manifest (`META-INF/MANIFEST.MF`)
//!
//! `Key: Value` lines. A line starting with a single space continues the
//! previous value. Blank lines end the main section; later sections are
//! ignored.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, config as config_error};

/// Conventional location of the manifest inside a package
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Name of the hosted entry point
pub const ENTRY_POINT_ATTRIBUTE: &str = "Original-Entry-Point";

/// Local library directory
pub const LIBRARY_PATH_ATTRIBUTE: &str = "Library-Path";

/// Remote cache directory
pub const CACHE_DIR_ATTRIBUTE: &str = "Cache-Dir";

/// `local` or `remote`
pub const MODE_ATTRIBUTE: &str = "Dependency-Mode";

/// Artifact file extension
pub const EXTENSION_ATTRIBUTE: &str = "Artifact-Extension";

/// Main attributes of a package manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    attributes: HashMap<String, String>,
}

impl PackageManifest {
    pub fn parse(text: &str) -> Self {
        let mut attributes = HashMap::new();
        let mut current: Option<(String, String)> = None;

        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                break;
            }

            if let Some(continuation) = line.strip_prefix(' ') {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(continuation);
                }
                continue;
            }

            if let Some((key, value)) = current.take() {
                attributes.insert(key, value);
            }

            match line.split_once(':') {
                Some((key, value)) => {
                    current = Some((key.trim().to_string(), value.trim_start().to_string()));
                }
                None => tracing::debug!(line, "ignoring manifest line without ':'"),
            }
        }

        if let Some((key, value)) = current {
            attributes.insert(key, value);
        }

        Self { attributes }
    }

    /// Load the manifest at `path`; an absent file is an empty manifest
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(config_error::manifest_read_failed(
                path.display().to_string(),
                e.to_string(),
            )),
        }
    }

    /// Non-empty value of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
