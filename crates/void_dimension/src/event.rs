//! The one-shot "ready for registration" notification
//!
//! The host fires it once per session, after attaching. Listeners receive a
//! [`RegisterEvent`] carrying the manager and register their worlds through
//! it, synchronously and on the host's thread.

use std::fmt;

use crate::error::DimensionResult;
use crate::manager::DimensionManager;

/// Event passed to every registration listener
pub struct RegisterEvent<'a> {
    manager: &'a DimensionManager,
}

impl<'a> RegisterEvent<'a> {
    pub(crate) fn new(manager: &'a DimensionManager) -> Self {
        Self { manager }
    }

    /// The manager to register worlds with
    pub fn manager(&self) -> &'a DimensionManager {
        self.manager
    }
}

impl fmt::Debug for RegisterEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterEvent").finish_non_exhaustive()
    }
}

/// Receives the registration notification
pub trait RegisterListener: Send + Sync {
    /// Called once per session when registration opens
    fn on_register(&self, event: &RegisterEvent<'_>) -> DimensionResult<()>;
}

impl<F> RegisterListener for F
where
    F: Fn(&RegisterEvent<'_>) -> DimensionResult<()> + Send + Sync,
{
    fn on_register(&self, event: &RegisterEvent<'_>) -> DimensionResult<()> {
        self(event)
    }
}

/// Outcome of one notification dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Notified {
    /// Listeners called
    pub listeners: usize,
    /// Listeners that returned an error
    pub failed: usize,
}
