//! Error types for registry tables and keys

use thiserror::Error;

/// Result type alias
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
///
/// Absence of a value is never an error; lookups return `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Identifier does not follow the namespacing rule
    #[error("Invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier {
        identifier: String,
        reason: String,
    },
}
