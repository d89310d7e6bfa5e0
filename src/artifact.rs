//! Acquired artifact model shared by both acquisition strategies

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::descriptor::DependencyCoordinate;

/// A library artifact that has been placed on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArtifact {
    /// Coordinate the artifact was acquired for, if known
    pub coordinate: Option<DependencyCoordinate>,
    pub location: PathBuf,
}

impl ResolvedArtifact {
    pub fn new(coordinate: Option<DependencyCoordinate>, location: impl Into<PathBuf>) -> Self {
        Self {
            coordinate,
            location: location.into(),
        }
    }

    /// File name of the artifact, for log output
    pub fn file_name(&self) -> String {
        self.location
            .file_name()
            .map_or_else(|| self.location.display().to_string(), |n| {
                n.to_string_lossy().into_owned()
            })
    }
}

/// Collect the on-disk locations of a set of artifacts, preserving order
pub fn locations(artifacts: &[ResolvedArtifact]) -> Vec<PathBuf> {
    artifacts.iter().map(|a| a.location.clone()).collect()
}

/// Whether `path` is an existing regular file that can be opened for reading
pub fn is_readable_file(path: &Path) -> bool {
    path.is_file() && std::fs::File::open(path).is_ok()
}
