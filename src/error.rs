//! Unified error types for the student registry.

use thiserror::Error;

/// Unified error type for the registry service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Registry store error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the in-memory student store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No record matches the requested id.
    ///
    /// `id` is `None` when the path segment did not parse as an integer.
    #[error("student not found: {}", display_id(id))]
    NotFound {
        /// The id that was looked up.
        id: Option<i64>,
    },
}

fn display_id(id: &Option<i64>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "<invalid id>".to_string(),
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_includes_id() {
        let err = RegistryError::NotFound { id: Some(42) };
        assert_eq!(err.to_string(), "student not found: 42");

        let err = RegistryError::NotFound { id: None };
        assert_eq!(err.to_string(), "student not found: <invalid id>");
    }

    #[test]
    fn registry_error_converts_into_service_error() {
        let err: ServiceError = RegistryError::NotFound { id: Some(1) }.into();
        assert!(matches!(err, ServiceError::Registry(_)));
    }
}
