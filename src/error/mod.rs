//! Error types and handling for rtdep
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration and package metadata errors
//! - [`resolve`]: Local and remote artifact acquisition errors
//! - [`entry`]: Symbol resolution and entry point errors
//! - [`fs`]: File system errors

pub mod config;
pub mod entry;
pub mod fs;
pub mod resolve;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bootstrap operations
#[derive(Error, Diagnostic, Debug)]
pub enum RtdepError {
    // Configuration errors
    #[error("No entry point specified")]
    #[diagnostic(
        code(rtdep::config::missing_entry_point),
        help(
            "Set one of: --entry-point <NAME>, RUNTIME_DEPENDENCY_ENTRY_POINT=<NAME>, \
             or 'Original-Entry-Point: <NAME>' in META-INF/MANIFEST.MF"
        )
    )]
    MissingEntryPoint,

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(rtdep::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read package manifest: {path}")]
    #[diagnostic(code(rtdep::config::manifest_read_failed))]
    ManifestReadFailed { path: String, reason: String },

    #[error("Failed to read dependency descriptor: {path}")]
    #[diagnostic(code(rtdep::config::descriptor_read_failed))]
    DescriptorReadFailed { path: String, reason: String },

    // Acquisition errors
    #[error("Artifact '{coordinate}' not found in any repository (tried: {repositories})")]
    #[diagnostic(
        code(rtdep::resolve::not_found),
        help("Check the coordinate and that the repository credentials are set")
    )]
    ArtifactNotFound {
        coordinate: String,
        repositories: String,
    },

    #[error("Failed to resolve '{coordinate}': {reason}")]
    #[diagnostic(code(rtdep::resolve::failed))]
    ResolutionFailed { coordinate: String, reason: String },

    #[error("Invalid repository URL for '{name}': {url}")]
    #[diagnostic(
        code(rtdep::resolve::invalid_repository_url),
        help("Repository URLs must be absolute http(s) or file URLs")
    )]
    InvalidRepositoryUrl { name: String, url: String },

    #[error("Transport error for {url}: {reason}")]
    #[diagnostic(code(rtdep::resolve::transport_failed))]
    TransportFailed { url: String, reason: String },

    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(rtdep::cache::operation_failed))]
    CacheOperationFailed { message: String },

    // Scope errors
    #[error("Artifact location does not exist or is not a file: {path}")]
    #[diagnostic(code(rtdep::scope::artifact_missing))]
    ArtifactMissing { path: String },

    #[error("Failed to load artifact {path}: {reason}")]
    #[diagnostic(code(rtdep::scope::artifact_load_failed))]
    ArtifactLoadFailed { path: String, reason: String },

    #[error("Symbol not found: {name}")]
    #[diagnostic(code(rtdep::scope::symbol_not_found))]
    SymbolNotFound { name: String },

    // Entry point errors
    #[error("Entry point not found: {name}")]
    #[diagnostic(
        code(rtdep::entry::not_found),
        help("Check that the artifact providing the entry point was acquired")
    )]
    EntryPointNotFound { name: String },

    #[error("Entry point '{name}' is not callable (found {found})")]
    #[diagnostic(
        code(rtdep::entry::shape),
        help("The entry point must be exported as an entry function taking the argument list")
    )]
    EntryPointShape { name: String, found: String },

    #[error("Entry point '{name}' failed: {reason}")]
    #[diagnostic(code(rtdep::entry::failed))]
    EntryPointFailed { name: String, reason: String },

    // File system errors
    #[error("Failed to write file: {path}")]
    #[diagnostic(code(rtdep::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(rtdep::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for RtdepError {
    fn from(err: std::io::Error) -> Self {
        RtdepError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RtdepError {
    fn from(err: serde_json::Error) -> Self {
        RtdepError::CacheOperationFailed {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for RtdepError {
    fn from(err: reqwest::Error) -> Self {
        RtdepError::TransportFailed {
            url: err
                .url()
                .map_or_else(|| "unknown".to_string(), ToString::to_string),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RtdepError>;
