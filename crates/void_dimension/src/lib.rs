//! # Void Dimension
//!
//! Registers new worlds with a running server and brings them online
//! without a restart.
//!
//! The host owns a set of dynamic registries that only exist while a server
//! session runs. The [`DimensionManager`] observes that session and exposes
//! an idempotent registration API on top of it:
//!
//! ```text
//! host: attach ──► notify_ready ──► listeners register_world(...)
//!                                        │
//! host: load_pending_worlds / activate_world ──► WorldHost::load_world
//! host: detach
//! ```
//!
//! ## Key Invariants
//!
//! 1. **Readiness is one predicate** - ready iff a live session is attached
//! 2. **First registration wins** - re-registering an identifier is a no-op
//! 3. **Keys are derived** - equal identifiers always give equal keys
//! 4. **One notification per session** - fired only after attach
//!
//! ## Usage
//!
//! ```ignore
//! let manager = DimensionManager::new(DimensionConfig::default());
//! manager.subscribe(|event| {
//!     let def = WorldDefinition::from_locations("minecraft:overworld", "mod:skylands")?;
//!     event.manager().register_world("mod:skylands", def)?;
//!     Ok(())
//! });
//!
//! manager.attach(&registries, &server);
//! manager.notify_ready()?;
//! manager.load_pending_worlds(&mut server_host)?;
//! ```

pub mod config;
pub mod definition;
pub mod descriptor;
pub mod error;
pub mod event;
pub mod host;
pub mod manager;
pub mod session;

pub use config::{ConfigError, DimensionConfig};
pub use definition::{World, WorldDefinition, WorldKey};
pub use descriptor::{Biome, GenerationSettings, Precipitation, WorldType};
pub use error::{DimensionError, DimensionResult, ReferenceKind};
pub use event::{Notified, RegisterEvent, RegisterListener};
pub use host::{HostError, LiveWorld, WorldHost, WorldLoadRequest, WorldsOfType};
pub use manager::DimensionManager;
pub use session::{DynamicRegistries, ServerConfiguration};

pub use void_registry::{Identifier, Registrable, RegistryError, RegistryKey, RegistryTable};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::DimensionConfig;
    pub use crate::definition::{WorldDefinition, WorldKey};
    pub use crate::descriptor::{Biome, GenerationSettings, WorldType};
    pub use crate::error::{DimensionError, DimensionResult};
    pub use crate::event::{RegisterEvent, RegisterListener};
    pub use crate::host::{LiveWorld, WorldHost, WorldLoadRequest};
    pub use crate::manager::DimensionManager;
    pub use crate::session::{DynamicRegistries, ServerConfiguration};
    pub use void_registry::{Identifier, RegistryKey};
}
