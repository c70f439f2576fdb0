use thiserror::Error;

/// Errors returned by the prototype registry.
///
/// Singleton construction errors are not wrapped here: whatever error type the
/// constructor returns is handed back to the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// No exemplar is registered under the requested name.
    #[error("No prototype registered under name: {name}")]
    KeyNotFound { name: String },

    /// The exemplar exists but is not of the requested concrete type.
    #[error("Prototype {name} is a {found}, not a {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl PatternError {
    pub(crate) fn key_not_found(name: &str) -> Self {
        PatternError::KeyNotFound {
            name: name.to_string(),
        }
    }
}
