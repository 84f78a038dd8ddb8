//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from I/O errors to [`AppError`], keeping
//! missing files and permission problems apart from other I/O failures.

use super::app_error::AppError;
use super::kind::ErrorKind;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::Io,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}
