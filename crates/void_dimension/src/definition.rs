//! World definitions and live-world keys

use serde::{Deserialize, Serialize};
use void_registry::{Identifier, Registrable, RegistryKey, RegistryResult};

use crate::descriptor::{GenerationSettings, WorldType};

/// How to construct one world: which type it has and which settings its
/// generator uses.
///
/// Both references are keys into the session's dynamic registries and are
/// resolved only when the world is brought online.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDefinition {
    pub world_type: RegistryKey<WorldType>,
    pub settings: RegistryKey<GenerationSettings>,
    /// Generator seed
    #[serde(default)]
    pub seed: u64,
}

impl WorldDefinition {
    /// Create a definition from already-derived keys
    pub fn new(world_type: RegistryKey<WorldType>, settings: RegistryKey<GenerationSettings>) -> Self {
        Self {
            world_type,
            settings,
            seed: 0,
        }
    }

    /// Create a definition from the locations of its descriptors
    pub fn from_locations(
        world_type: impl Into<Identifier>,
        settings: impl Into<Identifier>,
    ) -> RegistryResult<Self> {
        Ok(Self::new(
            RegistryKey::derive(&world_type.into())?,
            RegistryKey::derive(&settings.into())?,
        ))
    }

    /// Set the generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Registrable for WorldDefinition {
    const REGISTRY: &'static str = "minecraft:dimension";
}

/// Tag for keys that address live worlds held by the host
#[derive(Debug)]
pub enum World {}

impl Registrable for World {
    const REGISTRY: &'static str = "minecraft:world";
}

/// Key of a live world
pub type WorldKey = RegistryKey<World>;
