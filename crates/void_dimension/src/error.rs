//! Error types for the dimension manager

use std::fmt;

use thiserror::Error;
use void_registry::{Identifier, RegistryError};

use crate::config::ConfigError;

/// Result type alias
pub type DimensionResult<T> = Result<T, DimensionError>;

/// Which descriptor table a definition reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    WorldType,
    GenerationSettings,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::WorldType => write!(f, "world type"),
            ReferenceKind::GenerationSettings => write!(f, "generation settings"),
        }
    }
}

/// Dimension manager errors
///
/// All of these are ordering or logic errors; none are worth retrying
/// without the caller changing something first.
#[derive(Debug, Error)]
pub enum DimensionError {
    /// No session is attached
    #[error("Dimension manager is not ready: no session attached")]
    NotReady,

    /// Identifier breaks the namespacing rule
    #[error(transparent)]
    InvalidIdentifier(#[from] RegistryError),

    /// Nothing is registered under the identifier
    #[error("No world registered under '{0}'")]
    UnknownIdentifier(Identifier),

    /// A registered definition points at a missing descriptor
    #[error("World '{world}' references unregistered {kind} '{reference}'")]
    UnresolvedReference {
        world: Identifier,
        kind: ReferenceKind,
        reference: Identifier,
    },

    /// The host broke its calling contract
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// The host failed to bring a world online
    #[error("Host failed to load world '{world}': {message}")]
    Host {
        world: Identifier,
        message: String,
    },

    /// The manager configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
