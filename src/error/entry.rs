//! Symbol resolution and entry point errors

use super::RtdepError;

/// Creates an entry point not found error
pub fn not_found(name: impl Into<String>) -> RtdepError {
    RtdepError::EntryPointNotFound { name: name.into() }
}

/// Creates an entry point shape mismatch error
pub fn shape(name: impl Into<String>, found: impl Into<String>) -> RtdepError {
    RtdepError::EntryPointShape {
        name: name.into(),
        found: found.into(),
    }
}

/// Creates an entry point failure error
pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> RtdepError {
    RtdepError::EntryPointFailed {
        name: name.into(),
        reason: reason.into(),
    }
}
