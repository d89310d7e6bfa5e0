//! File system errors

use super::RtdepError;

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> RtdepError {
    RtdepError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> RtdepError {
    RtdepError::IoError {
        message: message.into(),
    }
}
