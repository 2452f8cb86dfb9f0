//! Shared test host

#![allow(dead_code)]

use std::sync::Arc;

use void_dimension::*;

/// A live world as the mock server keeps it
#[derive(Debug)]
pub struct MockWorld {
    pub key: WorldKey,
    pub world_type: RegistryKey<WorldType>,
    pub settings: Arc<GenerationSettings>,
}

impl LiveWorld for MockWorld {
    fn key(&self) -> &WorldKey {
        &self.key
    }

    fn world_type(&self) -> &RegistryKey<WorldType> {
        &self.world_type
    }
}

/// Records every load request and keeps worlds in load order
#[derive(Default)]
pub struct MockServer {
    pub loads: Vec<WorldLoadRequest>,
    pub worlds: Vec<MockWorld>,
    pub fail_on: Option<Identifier>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a world online directly, bypassing the manager
    pub fn spawn(&mut self, location: &str, world_type: &str) {
        self.worlds.push(MockWorld {
            key: WorldKey::derive(&Identifier::from(location)).unwrap(),
            world_type: RegistryKey::derive(&Identifier::from(world_type)).unwrap(),
            settings: Arc::new(GenerationSettings::overworld()),
        });
    }
}

impl WorldHost for MockServer {
    type World = MockWorld;
    type Worlds<'a> = std::slice::Iter<'a, MockWorld>;

    fn load_world(&mut self, request: WorldLoadRequest) -> Result<(), HostError> {
        if self.fail_on.as_ref() == Some(request.key.location()) {
            return Err(format!("no room for {}", request.key.location()).into());
        }

        self.worlds.push(MockWorld {
            key: request.key.clone(),
            world_type: request.definition.world_type.clone(),
            settings: Arc::clone(&request.settings),
        });
        self.loads.push(request);
        Ok(())
    }

    fn worlds(&self) -> Self::Worlds<'_> {
        self.worlds.iter()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fresh session with the vanilla descriptors
pub fn session() -> (Arc<DynamicRegistries>, Arc<ServerConfiguration>) {
    (
        Arc::new(DynamicRegistries::builtin()),
        Arc::new(ServerConfiguration::new("world", 0)),
    )
}

pub fn definition(world_type: &str, settings: &str) -> WorldDefinition {
    WorldDefinition::from_locations(world_type, settings).unwrap()
}
