//! Runtime dependency descriptor
//!
//! The descriptor is a line-oriented text resource emitted at packaging time:
//!
//! ```text
//! # comment
//! DEP:<groupId>:<artifactId>:<version>
//! REPO:<name>:<url>:<needsAuth>:<credentialEnvPrefix>
//! ```
//!
//! ## Module Organization
//!
//! - `coordinate.rs`: `DependencyCoordinate` and `RepositoryDescriptor`
//! - `record.rs`: per-line parsing into discriminated records

pub mod coordinate;
pub mod record;

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

pub use coordinate::{DependencyCoordinate, RepositoryDescriptor};
pub use record::{Record, parse_line};

use record::{DEPENDENCY_PREFIX, REPOSITORY_PREFIX};

/// Conventional location of the descriptor inside a package
pub const DESCRIPTOR_PATH: &str = "META-INF/runtime-dependencies.txt";

/// Parsed descriptor: dependencies and repositories in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeDescriptor {
    pub dependencies: Vec<DependencyCoordinate>,
    pub repositories: Vec<RepositoryDescriptor>,
}

impl RuntimeDescriptor {
    /// Parse descriptor text. Never fails; malformed lines are dropped.
    pub fn parse(text: &str) -> Self {
        let mut descriptor = Self::default();

        for record in parse_records(text) {
            match record {
                Record::Dependency(coord) => descriptor.dependencies.push(coord),
                Record::Repository(repo) => descriptor.repositories.push(repo),
                Record::Malformed { line_number } => {
                    tracing::debug!(line_number, "dropping malformed descriptor line");
                }
            }
        }

        descriptor
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.repositories.is_empty()
    }

    /// Serialize back to descriptor text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for dep in &self.dependencies {
            let _ = writeln!(out, "{DEPENDENCY_PREFIX}{dep}");
        }
        for repo in &self.repositories {
            let _ = writeln!(out, "{REPOSITORY_PREFIX}{repo}");
        }
        out
    }
}

/// Parse every line of `text` into records, skipping blanks and comments
pub fn parse_records(text: &str) -> impl Iterator<Item = Record> + '_ {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(idx + 1, line))
}
