//! Host seam
//!
//! The dimension manager never constructs worlds itself. It resolves a
//! definition into a [`WorldLoadRequest`] and hands it to the host's
//! [`WorldHost`] implementation, which owns the running world set.

use std::sync::Arc;

use void_registry::RegistryKey;

use crate::definition::{WorldDefinition, WorldKey};
use crate::descriptor::{GenerationSettings, WorldType};

/// Error reported by a host while bringing a world online
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// Everything the host needs to construct one live world
#[derive(Debug, Clone)]
pub struct WorldLoadRequest {
    /// Key the live world is stored under
    pub key: WorldKey,
    /// The registered definition
    pub definition: Arc<WorldDefinition>,
    /// Resolved world-type descriptor
    pub world_type: Arc<WorldType>,
    /// Resolved generation settings
    pub settings: Arc<GenerationSettings>,
}

/// A world the host is currently running
pub trait LiveWorld {
    /// Key of this world
    fn key(&self) -> &WorldKey;

    /// Key of the world type this world was built from
    fn world_type(&self) -> &RegistryKey<WorldType>;
}

/// The running server, as seen by the dimension manager
pub trait WorldHost {
    type World: LiveWorld;

    /// Iterator over live worlds in the host's enumeration order
    type Worlds<'a>: Iterator<Item = &'a Self::World> + Clone
    where
        Self: 'a;

    /// Construct and bring online a world.
    ///
    /// Whether loading an already-live key is an error is the host's call.
    fn load_world(&mut self, request: WorldLoadRequest) -> Result<(), HostError>;

    /// All live worlds
    fn worlds(&self) -> Self::Worlds<'_>;

    /// The live world stored under `key`
    fn world(&self, key: &WorldKey) -> Option<&Self::World> {
        self.worlds().find(|world| world.key() == key)
    }
}

/// Live worlds of one type, filtered lazily from the host's enumeration
pub struct WorldsOfType<'a, H: WorldHost + 'a> {
    inner: H::Worlds<'a>,
    world_type: RegistryKey<WorldType>,
}

impl<'a, H: WorldHost + 'a> WorldsOfType<'a, H> {
    pub(crate) fn new(host: &'a H, world_type: RegistryKey<WorldType>) -> Self {
        Self {
            inner: host.worlds(),
            world_type,
        }
    }

    /// The world-type key being matched
    pub fn world_type(&self) -> &RegistryKey<WorldType> {
        &self.world_type
    }
}

impl<'a, H: WorldHost + 'a> Iterator for WorldsOfType<'a, H> {
    type Item = &'a H::World;

    fn next(&mut self) -> Option<Self::Item> {
        let wanted = &self.world_type;
        self.inner.find(|world| world.world_type() == wanted)
    }
}

impl<'a, H: WorldHost + 'a> Clone for WorldsOfType<'a, H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            world_type: self.world_type.clone(),
        }
    }
}
