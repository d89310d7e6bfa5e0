//! Caching resolver over a Maven repository layout
//!
//! Artifacts are stored in the cache under the same relative path they have
//! in a repository (`com/example/lib/1.0.0/lib-1.0.0.jar`), so a cache
//! directory doubles as a local repository. Each downloaded file gets a
//! `<file>.rtdep.json` sidecar recording where it came from and its BLAKE3
//! hash; a cached file that no longer matches its sidecar is fetched again.
//!
//! Transitive dependencies are not expanded: the resolver returns the
//! requested artifact only. A resolver that reads dependency metadata can be
//! plugged in through [`ArtifactResolver`] instead.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use url::Url;

use super::contract::{ArtifactResolver, RemoteRepository, ResolutionRequest};
use super::transport::{FetchOutcome, Transport};
use crate::error::{RtdepError, Result, fs as fs_error, resolve as resolve_error};

/// Suffix of the cache sidecar file
pub const SIDECAR_SUFFIX: &str = ".rtdep.json";

/// Hash prefix for BLAKE3 hashes
const HASH_PREFIX: &str = "blake3:";

/// Provenance of a cached artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub repository: String,
    pub url: String,
    pub hash: String,
}

/// Resolver that serves artifacts from a local cache, fetching misses
/// through a [`Transport`]
pub struct MavenResolver<T> {
    transport: T,
}

impl<T: Transport> MavenResolver<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn fetch_into_cache(
        &self,
        repo: &RemoteRepository,
        relative: &str,
        target: &Path,
    ) -> Result<Option<CacheRecord>> {
        let url = artifact_url(repo, relative)?;
        let dir = target
            .parent()
            .ok_or_else(|| resolve_error::cache_failed("artifact path has no parent"))?;
        std::fs::create_dir_all(dir)
            .map_err(|e| fs_error::write_failed(dir.display().to_string(), e.to_string()))?;

        let mut temp = NamedTempFile::new_in(dir)
            .map_err(|e| fs_error::write_failed(dir.display().to_string(), e.to_string()))?;

        match self
            .transport
            .fetch(&url, repo.credentials.as_ref(), temp.as_file_mut())?
        {
            FetchOutcome::Missing => return Ok(None),
            FetchOutcome::Fetched => {}
        }

        temp.persist(target)
            .map_err(|e| fs_error::write_failed(target.display().to_string(), e.to_string()))?;

        let record = CacheRecord {
            repository: repo.name.clone(),
            url: url.to_string(),
            hash: hash_file(target)?,
        };
        write_sidecar(target, &record)?;
        Ok(Some(record))
    }
}

impl<T: Transport> ArtifactResolver for MavenResolver<T> {
    fn resolve(&self, request: &ResolutionRequest<'_>) -> Result<Vec<PathBuf>> {
        let coordinate = request.coordinate.to_string();
        let relative = request.coordinate.repository_path(request.extension);
        if !stays_inside(&relative) {
            return Err(resolve_error::failed(
                coordinate,
                "coordinate does not map to a path inside the cache",
            ));
        }
        let target = request.cache_dir.join(&relative);

        if is_cached(&target)? {
            tracing::debug!(coordinate = %coordinate, path = %target.display(), "cache hit");
            return Ok(vec![target]);
        }

        let mut failures = Vec::new();
        for repo in request.repositories {
            match self.fetch_into_cache(repo, &relative, &target) {
                Ok(Some(record)) => {
                    tracing::info!(
                        coordinate = %coordinate,
                        repository = %record.repository,
                        "downloaded {}",
                        record.url
                    );
                    return Ok(vec![target]);
                }
                Ok(None) => {
                    tracing::debug!(coordinate = %coordinate, repository = %repo.name, "not in repository");
                }
                Err(e) => {
                    tracing::debug!(coordinate = %coordinate, repository = %repo.name, "fetch failed: {e}");
                    failures.push(format!("{}: {e}", repo.name));
                }
            }
        }

        if failures.is_empty() {
            let tried: Vec<String> = request.repositories.iter().map(|r| r.name.clone()).collect();
            Err(resolve_error::not_found(coordinate, &tried))
        } else {
            Err(resolve_error::failed(coordinate, failures.join("; ")))
        }
    }
}

/// Whether `relative` is made of plain segments only (no root, no `..`)
fn stays_inside(relative: &str) -> bool {
    let path = Path::new(relative);
    !relative.is_empty()
        && !relative.contains('\\')
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Full URL of `relative` inside `repo`
fn artifact_url(repo: &RemoteRepository, relative: &str) -> Result<Url> {
    let invalid = || RtdepError::InvalidRepositoryUrl {
        name: repo.name.clone(),
        url: repo.url.clone(),
    };
    let base = Url::parse(&format!("{}/", repo.url.trim_end_matches('/'))).map_err(|_| invalid())?;
    if base.cannot_be_a_base() {
        return Err(invalid());
    }
    base.join(relative).map_err(|_| invalid())
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.as_os_str().to_owned();
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// A cached artifact is usable when it exists and, if it has a sidecar,
/// still matches the recorded hash
fn is_cached(target: &Path) -> Result<bool> {
    if !target.is_file() {
        return Ok(false);
    }

    let Some(record) = read_sidecar(target) else {
        return Ok(true);
    };

    let actual = hash_file(target)?;
    if actual == record.hash {
        Ok(true)
    } else {
        tracing::warn!(
            path = %target.display(),
            "cached artifact does not match its recorded hash, fetching again"
        );
        Ok(false)
    }
}

fn read_sidecar(artifact: &Path) -> Option<CacheRecord> {
    let content = std::fs::read_to_string(sidecar_path(artifact)).ok()?;
    serde_json::from_str(&content).ok()
}

fn write_sidecar(artifact: &Path, record: &CacheRecord) -> Result<()> {
    let path = sidecar_path(artifact);
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, json)
        .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))
}

/// Calculate the BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| {
        resolve_error::cache_failed(format!("failed to read {}: {e}", path.display()))
    })?;

    let mut reader = BufReader::new(file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| {
            resolve_error::cache_failed(format!("failed to read {}: {e}", path.display()))
        })?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}
