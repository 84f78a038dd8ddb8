//! Mapping Error Types
//!
//! This module provides generation-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Mapping-specific result type alias
pub type MappingResult<T> = Result<T, MappingError>;

/// Mapping-specific error variants
#[derive(Debug, Error)]
pub enum MappingError {
    /// A descriptor selected for mapping lacks a field the labels need
    #[error("descriptor `{descriptor}` is missing required field `{field}`")]
    MissingField {
        descriptor: String,
        field: &'static str,
    },

    /// An input action entry does not populate exactly one variant
    #[error(
        "descriptor `{descriptor}` action #{index} must set exactly one of requestHeaders, remoteAddress, genericKey, headerValueMatch (found {populated})"
    )]
    MalformedAction {
        descriptor: String,
        index: usize,
        populated: usize,
    },

    /// The artifact builder needs a service name to derive resource names
    #[error("rate limit service name must not be empty")]
    InvalidServiceName,

    /// A descriptor document is not valid YAML for the expected shape
    #[error("invalid descriptor document: {0}")]
    InvalidYaml(#[source] serde_yaml::Error),

    /// A descriptor document is not valid JSON for the expected shape
    #[error("invalid descriptor document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A generated document could not be serialized
    #[error("failed to render document: {0}")]
    Render(#[source] serde_yaml::Error),
}

impl MappingError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MappingError::MissingField { .. } => ErrorKind::ContractViolation,
            MappingError::MalformedAction { .. }
            | MappingError::InvalidYaml(_)
            | MappingError::InvalidJson(_) => ErrorKind::InvalidInput,
            MappingError::InvalidServiceName => ErrorKind::InvalidConfiguration,
            MappingError::Render(_) => ErrorKind::Serialization,
        }
    }
}

impl From<MappingError> for AppError {
    fn from(err: MappingError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message).with_source(err)
    }
}
