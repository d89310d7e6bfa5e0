//! Dependency coordinates and repository definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(group, artifact, version)` triple identifying one library artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl DependencyCoordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// File name of the artifact under the `{artifactId}-{version}.{extension}` convention
    ///
    /// An empty extension yields the bare `{artifactId}-{version}` name.
    pub fn file_name(&self, extension: &str) -> String {
        if extension.is_empty() {
            format!("{}-{}", self.artifact_id, self.version)
        } else {
            format!("{}-{}.{}", self.artifact_id, self.version, extension)
        }
    }

    /// Repository-relative directory of this coordinate in the Maven layout
    /// (e.g. `com/example/lib/1.0.0`)
    pub fn repository_dir(&self) -> String {
        format!(
            "{}/{}/{}",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version
        )
    }

    /// Repository-relative path of the artifact file in the Maven layout
    pub fn repository_path(&self, extension: &str) -> String {
        format!("{}/{}", self.repository_dir(), self.file_name(extension))
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A remote repository declared by the descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    /// May itself contain `:` (scheme separator, port)
    pub url: String,
    pub needs_auth: bool,
    /// Prefix of the `{prefix}_USERNAME` / `{prefix}_PASSWORD` variables
    pub credential_env_prefix: String,
}

impl RepositoryDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            needs_auth: false,
            credential_env_prefix: String::new(),
        }
    }

    #[must_use]
    pub fn with_auth(mut self, env_prefix: impl Into<String>) -> Self {
        self.needs_auth = true;
        self.credential_env_prefix = env_prefix.into();
        self
    }

    /// Whether credentials should be looked up for this repository
    pub fn wants_credentials(&self) -> bool {
        self.needs_auth && !self.credential_env_prefix.is_empty()
    }
}

impl fmt::Display for RepositoryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.name, self.url, self.needs_auth, self.credential_env_prefix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_convention() {
        let coord = DependencyCoordinate::new("com.example", "lib", "1.0.0");
        assert_eq!(coord.file_name("jar"), "lib-1.0.0.jar");
        assert_eq!(coord.file_name("so"), "lib-1.0.0.so");
        assert_eq!(coord.file_name(""), "lib-1.0.0");
    }

    #[test]
    fn test_repository_path_uses_group_segments() {
        let coord = DependencyCoordinate::new("org.apache.commons", "commons-lang3", "3.14.0");
        assert_eq!(
            coord.repository_path("jar"),
            "org/apache/commons/commons-lang3/3.14.0/commons-lang3-3.14.0.jar"
        );
    }

    #[test]
    fn test_coordinate_display() {
        let coord = DependencyCoordinate::new("com.example", "lib", "1.0.0");
        assert_eq!(coord.to_string(), "com.example:lib:1.0.0");
    }

    #[test]
    fn test_wants_credentials_requires_prefix() {
        let repo = RepositoryDescriptor::new("internal", "https://repo.example.com");
        assert!(!repo.wants_credentials());

        let mut repo = repo.with_auth("ACME");
        assert!(repo.wants_credentials());

        repo.credential_env_prefix.clear();
        assert!(!repo.wants_credentials());
    }
}
