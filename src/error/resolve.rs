//! Artifact acquisition errors

use super::RtdepError;

/// Creates an artifact not found error listing every repository that was tried
pub fn not_found(coordinate: impl Into<String>, repositories: &[String]) -> RtdepError {
    RtdepError::ArtifactNotFound {
        coordinate: coordinate.into(),
        repositories: if repositories.is_empty() {
            "none configured".to_string()
        } else {
            repositories.join(", ")
        },
    }
}

/// Creates a resolution failed error
pub fn failed(coordinate: impl Into<String>, reason: impl Into<String>) -> RtdepError {
    RtdepError::ResolutionFailed {
        coordinate: coordinate.into(),
        reason: reason.into(),
    }
}

/// Creates a transport failed error
pub fn transport_failed(url: impl Into<String>, reason: impl Into<String>) -> RtdepError {
    RtdepError::TransportFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a cache operation failed error
pub fn cache_failed(message: impl Into<String>) -> RtdepError {
    RtdepError::CacheOperationFailed {
        message: message.into(),
    }
}
