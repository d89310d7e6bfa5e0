//! Configuration errors

use super::RtdepError;

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> RtdepError {
    RtdepError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a manifest read failed error
pub fn manifest_read_failed(path: impl Into<String>, reason: impl Into<String>) -> RtdepError {
    RtdepError::ManifestReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a descriptor read failed error
pub fn descriptor_read_failed(path: impl Into<String>, reason: impl Into<String>) -> RtdepError {
    RtdepError::DescriptorReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
