//! Session-scoped registry state owned by the host
//!
//! The host creates one [`DynamicRegistries`] and one [`ServerConfiguration`]
//! per server session and hands them to the dimension manager on attach.
//! The manager only observes them; dropping the host's `Arc`s ends their
//! validity.

use std::fmt;

use void_registry::{Identifier, Registrable, RegistryKey, RegistryTable};

use crate::definition::WorldDefinition;
use crate::descriptor::{Biome, GenerationSettings, WorldType};

/// The mutable lookup tables that exist only while a session runs
#[derive(Default)]
pub struct DynamicRegistries {
    world_types: RegistryTable<WorldType>,
    settings: RegistryTable<GenerationSettings>,
    biomes: RegistryTable<Biome>,
}

impl DynamicRegistries {
    /// Create empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create tables pre-populated with the vanilla entries
    pub fn builtin() -> Self {
        let registries = Self::new();

        insert_builtin(&registries.world_types, "overworld", WorldType::overworld());
        insert_builtin(&registries.world_types, "the_nether", WorldType::the_nether());
        insert_builtin(&registries.world_types, "the_end", WorldType::the_end());

        insert_builtin(&registries.settings, "overworld", GenerationSettings::overworld());
        insert_builtin(&registries.settings, "nether", GenerationSettings::nether());
        insert_builtin(&registries.settings, "end", GenerationSettings::end());

        insert_builtin(&registries.biomes, "plains", Biome::plains());
        insert_builtin(&registries.biomes, "desert", Biome::desert());
        insert_builtin(&registries.biomes, "nether_wastes", Biome::nether_wastes());
        insert_builtin(&registries.biomes, "the_end", Biome::the_end());

        registries
    }

    /// World-type descriptors
    pub fn world_types(&self) -> &RegistryTable<WorldType> {
        &self.world_types
    }

    /// Generation-settings descriptors
    pub fn settings(&self) -> &RegistryTable<GenerationSettings> {
        &self.settings
    }

    /// Biome descriptors
    pub fn biomes(&self) -> &RegistryTable<Biome> {
        &self.biomes
    }
}

fn insert_builtin<T: Registrable>(table: &RegistryTable<T>, path: &str, value: T) {
    match RegistryKey::derive(&Identifier::vanilla(path)) {
        Ok(key) => {
            table.insert_if_absent(key, value);
        }
        Err(e) => log::error!("Skipping builtin {} entry: {}", T::REGISTRY, e),
    }
}

impl fmt::Debug for DynamicRegistries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicRegistries")
            .field("world_types", &self.world_types.len())
            .field("settings", &self.settings.len())
            .field("biomes", &self.biomes.len())
            .finish()
    }
}

/// The server's in-progress level configuration
///
/// Holds the level's world-definition table. Persisting it between runs is
/// the host's job.
#[derive(Debug)]
pub struct ServerConfiguration {
    level_name: String,
    seed: u64,
    worlds: RegistryTable<WorldDefinition>,
}

impl ServerConfiguration {
    /// Create a configuration with an empty world table
    pub fn new(level_name: impl Into<String>, seed: u64) -> Self {
        Self {
            level_name: level_name.into(),
            seed,
            worlds: RegistryTable::new(),
        }
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// World definitions registered for this level
    pub fn worlds(&self) -> &RegistryTable<WorldDefinition> {
        &self.worlds
    }
}
