//! Package layout
//!
//! ```text
//! <root>/
//! ├── META-INF/
//! │   ├── MANIFEST.MF
//! │   └── runtime-dependencies.txt
//! └── libs/
//! ```
//!
//! Both metadata files are optional.

use std::path::{Path, PathBuf};

use crate::config::PackageManifest;
use crate::config::manifest::MANIFEST_PATH;
use crate::descriptor::{DESCRIPTOR_PATH, RuntimeDescriptor};
use crate::error::{Result, config as config_error, fs as fs_error};

/// A packaged application on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    root: PathBuf,
}

impl Package {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The package the running executable belongs to: its parent directory
    ///
    /// # Errors
    ///
    /// Returns an error if the executable path cannot be determined.
    pub fn current() -> Result<Self> {
        let exe = std::env::current_exe()
            .map_err(|e| fs_error::io_error(format!("Failed to locate executable: {e}")))?;
        let exe = dunce::canonicalize(&exe).unwrap_or(exe);
        let root = exe
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_PATH)
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.root.join(DESCRIPTOR_PATH)
    }

    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read.
    pub fn manifest(&self) -> Result<PackageManifest> {
        PackageManifest::load(&self.manifest_path())
    }

    /// Raw descriptor text, `None` if the package has no descriptor
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor exists but cannot be read.
    pub fn descriptor_text(&self) -> Result<Option<String>> {
        let path = self.descriptor_path();
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no dependency descriptor");
                Ok(None)
            }
            Err(e) => Err(config_error::descriptor_read_failed(
                path.display().to_string(),
                e.to_string(),
            )),
        }
    }

    /// Parsed descriptor; an absent descriptor is empty
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor exists but cannot be read.
    pub fn descriptor(&self) -> Result<RuntimeDescriptor> {
        Ok(self
            .descriptor_text()?
            .map(|text| RuntimeDescriptor::parse(&text))
            .unwrap_or_default())
    }
}
