//! Remote artifact acquisition
//!
//! Every coordinate is resolved against all configured repositories through an
//! [`ArtifactResolver`]. Unlike local mode, a single failure aborts the whole
//! acquisition: a partially resolved dependency set cannot be trusted.
//!
//! ## Module Organization
//!
//! - `contract.rs`: resolver contract, requests, credentials, environment
//! - `maven.rs`: caching resolver over a Maven repository layout
//! - `transport.rs`: HTTP(S) and `file://` transport

pub mod contract;
pub mod maven;
pub mod transport;

use std::path::Path;

use crate::artifact::ResolvedArtifact;
use crate::descriptor::{DependencyCoordinate, RepositoryDescriptor};
use crate::error::Result;

pub use contract::{
    ArtifactResolver, Credentials, DependencyScope, Environment, ProcessEnv, RemoteRepository,
    ResolutionRequest,
};
pub use maven::MavenResolver;
pub use transport::{Transport, UrlTransport};

/// Name of the implicit default repository
pub const CENTRAL_NAME: &str = "central";

/// URL of the implicit default repository
pub const CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

/// Hosts that serve Maven Central
const CENTRAL_HOSTS: &[&str] = &["repo.maven.apache.org", "repo1.maven.org", "repo.maven.org"];

/// Whether `url` points at Maven Central
pub fn is_maven_central(url: &str) -> bool {
    let normalized = url.trim_end_matches('/').to_lowercase();
    CENTRAL_HOSTS.iter().any(|host| normalized.contains(host))
}

/// Append Maven Central after the declared repositories unless one of them
/// already is Central. Descriptors omit Central because it is always available.
pub fn with_default_repository(repositories: &[RepositoryDescriptor]) -> Vec<RepositoryDescriptor> {
    let mut repos = repositories.to_vec();
    if !repos.iter().any(|r| is_maven_central(&r.url)) {
        repos.push(RepositoryDescriptor::new(CENTRAL_NAME, CENTRAL_URL));
    }
    repos
}

/// Turn descriptor repositories into resolver repositories, attaching
/// credentials from `{prefix}_USERNAME` / `{prefix}_PASSWORD` where requested
///
/// Missing credentials are not an error: the repository may still serve
/// public artifacts.
pub fn build_repositories(
    repositories: &[RepositoryDescriptor],
    env: &dyn Environment,
) -> Vec<RemoteRepository> {
    repositories
        .iter()
        .map(|repo| {
            tracing::info!(repository = %repo.name, url = %repo.url, "building repository");
            let credentials = if repo.wants_credentials() {
                lookup_credentials(&repo.credential_env_prefix, env)
            } else {
                None
            };
            match (&credentials, repo.wants_credentials()) {
                (Some(_), _) => {
                    tracing::info!(repository = %repo.name, "authentication enabled");
                }
                (None, true) => {
                    tracing::info!(repository = %repo.name, "no credentials found");
                }
                (None, false) => {}
            }
            RemoteRepository {
                name: repo.name.clone(),
                url: repo.url.clone(),
                credentials,
            }
        })
        .collect()
}

fn lookup_credentials(prefix: &str, env: &dyn Environment) -> Option<Credentials> {
    let username = env.var(&format!("{prefix}_USERNAME"))?;
    let password = env.var(&format!("{prefix}_PASSWORD"))?;
    Some(Credentials { username, password })
}

/// Resolves descriptor coordinates through an [`ArtifactResolver`]
pub struct RemoteArtifactResolver<'a> {
    resolver: &'a dyn ArtifactResolver,
    env: &'a dyn Environment,
    extension: String,
}

impl<'a> RemoteArtifactResolver<'a> {
    pub fn new(
        resolver: &'a dyn ArtifactResolver,
        env: &'a dyn Environment,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            env,
            extension: extension.into(),
        }
    }

    /// Resolve every coordinate, in order, against all repositories
    ///
    /// # Errors
    ///
    /// Returns the first resolution failure; nothing resolved before it is
    /// returned.
    pub fn resolve(
        &self,
        coordinates: &[DependencyCoordinate],
        repositories: &[RepositoryDescriptor],
        cache_dir: &Path,
    ) -> Result<Vec<ResolvedArtifact>> {
        if coordinates.is_empty() {
            tracing::info!("no dependencies to resolve");
            return Ok(Vec::new());
        }

        tracing::info!(
            "found {} dependencies and {} repositories",
            coordinates.len(),
            repositories.len()
        );
        tracing::info!(cache_dir = %cache_dir.display(), "using cache directory");

        let remote_repos = build_repositories(repositories, self.env);
        let mut artifacts = Vec::new();

        for coord in coordinates {
            tracing::info!(coordinate = %coord, "resolving");
            let request = ResolutionRequest {
                coordinate: coord,
                repositories: &remote_repos,
                scope: DependencyScope::Runtime,
                extension: &self.extension,
                cache_dir,
            };

            let files = self.resolver.resolve(&request).inspect_err(|e| {
                tracing::error!(coordinate = %coord, "error resolving dependency: {e}");
            })?;

            for (idx, file) in files.into_iter().enumerate() {
                let artifact = ResolvedArtifact::new((idx == 0).then(|| coord.clone()), file);
                tracing::info!("  -> {}", artifact.file_name());
                artifacts.push(artifact);
            }
        }

        tracing::info!("resolved {} artifacts", artifacts.len());
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;
    use crate::error::{RtdepError, resolve as resolve_error};

    /// Records every request and serves `<artifact>.jar` under a fake cache
    #[derive(Default)]
    struct RecordingResolver {
        requests: RefCell<Vec<(DependencyCoordinate, Vec<RemoteRepository>)>>,
        fail_on: Option<String>,
        transitive: HashMap<String, Vec<&'static str>>,
    }

    impl ArtifactResolver for RecordingResolver {
        fn resolve(&self, request: &ResolutionRequest<'_>) -> Result<Vec<PathBuf>> {
            assert_eq!(request.scope, DependencyScope::Runtime);
            self.requests.borrow_mut().push((
                request.coordinate.clone(),
                request.repositories.to_vec(),
            ));
            if self.fail_on.as_deref() == Some(request.coordinate.artifact_id.as_str()) {
                return Err(resolve_error::not_found(
                    request.coordinate.to_string(),
                    &["internal".to_string()],
                ));
            }
            let mut files = vec![
                request
                    .cache_dir
                    .join(request.coordinate.file_name(request.extension)),
            ];
            if let Some(extra) = self.transitive.get(&request.coordinate.artifact_id) {
                files.extend(extra.iter().map(|f| request.cache_dir.join(f)));
            }
            Ok(files)
        }
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_credentials_attached_only_to_auth_repository() {
        let repos = vec![
            RepositoryDescriptor::new("public", "https://repo.example.com/public"),
            RepositoryDescriptor::new("acme", "https://maven.acme.io/releases").with_auth("ACME"),
        ];
        let env = env(&[("ACME_USERNAME", "deploy"), ("ACME_PASSWORD", "s3cret")]);
        let resolver = RecordingResolver::default();
        let remote = RemoteArtifactResolver::new(&resolver, &env, "jar");

        let coords = vec![DependencyCoordinate::new("com.acme", "core", "1.2.0")];
        remote
            .resolve(&coords, &repos, Path::new("/cache"))
            .unwrap();

        let requests = resolver.requests.borrow();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0].1;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].credentials, None);
        assert_eq!(
            sent[1].credentials,
            Some(Credentials {
                username: "deploy".to_string(),
                password: "s3cret".to_string(),
            })
        );
    }

    #[test]
    fn test_partial_credentials_are_ignored() {
        let repos =
            vec![RepositoryDescriptor::new("acme", "https://maven.acme.io").with_auth("ACME")];
        let built = build_repositories(&repos, &env(&[("ACME_USERNAME", "deploy")]));
        assert_eq!(built[0].credentials, None);
    }

    #[test]
    fn test_credentials_not_read_without_needs_auth() {
        let mut repo = RepositoryDescriptor::new("acme", "https://maven.acme.io");
        repo.credential_env_prefix = "ACME".to_string();
        let built = build_repositories(
            &[repo],
            &env(&[("ACME_USERNAME", "u"), ("ACME_PASSWORD", "p")]),
        );
        assert_eq!(built[0].credentials, None);
    }

    #[test]
    fn test_every_coordinate_sees_all_repositories_in_order() {
        let repos = vec![
            RepositoryDescriptor::new("first", "https://one.example.com"),
            RepositoryDescriptor::new("second", "https://two.example.com"),
        ];
        let resolver = RecordingResolver::default();
        let env = env(&[]);
        let remote = RemoteArtifactResolver::new(&resolver, &env, "jar");
        let coords = vec![
            DependencyCoordinate::new("g", "a", "1"),
            DependencyCoordinate::new("g", "b", "1"),
        ];

        remote.resolve(&coords, &repos, Path::new("/cache")).unwrap();

        let requests = resolver.requests.borrow();
        let order: Vec<_> = requests.iter().map(|(c, _)| c.artifact_id.clone()).collect();
        assert_eq!(order, vec!["a", "b"]);
        for (_, sent) in requests.iter() {
            let names: Vec<_> = sent.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["first", "second"]);
        }
    }

    #[test]
    fn test_transitive_files_keep_resolver_order() {
        let resolver = RecordingResolver {
            transitive: [("app".to_string(), vec!["dep-a-1.jar", "dep-b-2.jar"])].into(),
            ..RecordingResolver::default()
        };
        let env = env(&[]);
        let remote = RemoteArtifactResolver::new(&resolver, &env, "jar");
        let coords = vec![
            DependencyCoordinate::new("g", "app", "1"),
            DependencyCoordinate::new("g", "other", "3"),
        ];

        let artifacts = remote.resolve(&coords, &[], Path::new("/cache")).unwrap();
        let names: Vec<_> = artifacts.iter().map(ResolvedArtifact::file_name).collect();
        assert_eq!(
            names,
            vec!["app-1.jar", "dep-a-1.jar", "dep-b-2.jar", "other-3.jar"]
        );
        assert_eq!(artifacts[0].coordinate.as_ref(), Some(&coords[0]));
        assert_eq!(artifacts[1].coordinate, None);
        assert_eq!(artifacts[3].coordinate.as_ref(), Some(&coords[1]));
    }

    #[test]
    fn test_failure_aborts_without_partial_result() {
        let resolver = RecordingResolver {
            fail_on: Some("broken".to_string()),
            ..RecordingResolver::default()
        };
        let env = env(&[]);
        let remote = RemoteArtifactResolver::new(&resolver, &env, "jar");
        let coords = vec![
            DependencyCoordinate::new("g", "fine", "1"),
            DependencyCoordinate::new("g", "broken", "1"),
            DependencyCoordinate::new("g", "never", "1"),
        ];

        let result = remote.resolve(&coords, &[], Path::new("/cache"));
        assert!(matches!(
            result,
            Err(RtdepError::ArtifactNotFound { .. })
        ));
        // The coordinate after the failure is never requested
        assert_eq!(resolver.requests.borrow().len(), 2);
    }

    #[test]
    fn test_empty_coordinates_skip_resolver() {
        let resolver = RecordingResolver::default();
        let env = env(&[]);
        let remote = RemoteArtifactResolver::new(&resolver, &env, "jar");
        assert!(remote.resolve(&[], &[], Path::new("/cache")).unwrap().is_empty());
        assert!(resolver.requests.borrow().is_empty());
    }

    #[test]
    fn test_default_repository_appended_once() {
        let repos = vec![RepositoryDescriptor::new("acme", "https://maven.acme.io")];
        let with_central = with_default_repository(&repos);
        assert_eq!(with_central.len(), 2);
        assert_eq!(with_central[1].url, CENTRAL_URL);

        let again = with_default_repository(&with_central);
        assert_eq!(again.len(), 2);

        let mirror = vec![RepositoryDescriptor::new("m", "https://repo1.maven.org/maven2/")];
        assert_eq!(with_default_repository(&mirror).len(), 1);
    }
}
