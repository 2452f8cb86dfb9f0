//! Dynamic dimension manager
//!
//! Bridges the host's session-scoped registries to a registration API that
//! callers may use at any time.
//!
//! ```text
//!            attach                 notify_ready
//! NotReady ─────────► Ready ──────────────────────► listeners ─► register_world
//!    ▲                  │                                          activate_world
//!    └──── detach ──────┘
//! ```
//!
//! Readiness is exactly "a session is attached and both of its references
//! are still alive". Attach and detach take the session lock for writing;
//! every other operation holds it for reading while it touches the tables,
//! so no operation ever sees a half-attached session.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use log::{debug, info, trace, warn};
use parking_lot::{Mutex, RwLock};
use void_registry::{Identifier, Registrable, RegistryKey, RegistryTable};

use crate::config::DimensionConfig;
use crate::definition::{WorldDefinition, WorldKey};
use crate::descriptor::{Biome, GenerationSettings, WorldType};
use crate::error::{DimensionError, DimensionResult, ReferenceKind};
use crate::event::{Notified, RegisterEvent, RegisterListener};
use crate::host::{WorldHost, WorldLoadRequest, WorldsOfType};
use crate::session::{DynamicRegistries, ServerConfiguration};

/// One attached session
struct Session {
    generation: u64,
    registries: Weak<DynamicRegistries>,
    server: Weak<ServerConfiguration>,
    /// The notification has fired for this session
    notified: AtomicBool,
    /// Listeners are running right now
    dispatching: AtomicBool,
    /// Registered during the notification, not yet loaded
    pending: Mutex<Vec<Identifier>>,
}

impl Session {
    fn is_alive(&self) -> bool {
        self.registries.strong_count() > 0 && self.server.strong_count() > 0
    }

    fn upgrade(&self) -> Option<Attached<'_>> {
        Some(Attached {
            session: self,
            registries: self.registries.upgrade()?,
            server: self.server.upgrade()?,
        })
    }
}

/// A live view of the attached session
struct Attached<'s> {
    session: &'s Session,
    registries: Arc<DynamicRegistries>,
    server: Arc<ServerConfiguration>,
}

impl Attached<'_> {
    /// Look up a definition and resolve both of its references
    fn resolve(&self, location: &Identifier) -> DimensionResult<WorldLoadRequest> {
        let worlds = self.server.worlds();
        let key = worlds.derive_key(location)?;
        let definition = worlds
            .get(&key)
            .ok_or_else(|| DimensionError::UnknownIdentifier(location.clone()))?;

        let world_type = self
            .registries
            .world_types()
            .get(&definition.world_type)
            .ok_or_else(|| DimensionError::UnresolvedReference {
                world: location.clone(),
                kind: ReferenceKind::WorldType,
                reference: definition.world_type.location().clone(),
            })?;

        let settings = self
            .registries
            .settings()
            .get(&definition.settings)
            .ok_or_else(|| DimensionError::UnresolvedReference {
                world: location.clone(),
                kind: ReferenceKind::GenerationSettings,
                reference: definition.settings.location().clone(),
            })?;

        Ok(WorldLoadRequest {
            key: key.cast(),
            definition,
            world_type,
            settings,
        })
    }
}

/// Ends the dispatch window of one session, also when a listener unwinds
struct DispatchGuard<'m> {
    manager: &'m DimensionManager,
    generation: u64,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if let Some(session) = self.manager.session.read().as_ref() {
            if session.generation == self.generation {
                session.dispatching.store(false, Ordering::Release);
            }
        }
    }
}

fn lookup<T: Registrable>(
    table: &RegistryTable<T>,
    location: &Identifier,
) -> DimensionResult<Option<Arc<T>>> {
    let key = table.derive_key(location)?;
    Ok(table.get(&key))
}

/// The dynamic dimension manager
///
/// One instance serves one host process. Build it where the host is
/// assembled and share it by reference; tests may create as many as they
/// like.
pub struct DimensionManager {
    config: DimensionConfig,
    session: RwLock<Option<Session>>,
    listeners: RwLock<Vec<Arc<dyn RegisterListener>>>,
    next_generation: AtomicU64,
}

impl DimensionManager {
    /// Create a manager with no session attached
    pub fn new(config: DimensionConfig) -> Self {
        Self {
            config,
            session: RwLock::new(None),
            listeners: RwLock::new(Vec::new()),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Create a manager configured from a TOML file
    pub fn from_config_file(path: impl AsRef<std::path::Path>) -> DimensionResult<Self> {
        Ok(Self::new(DimensionConfig::load(path)?))
    }

    /// Active configuration
    pub fn config(&self) -> &DimensionConfig {
        &self.config
    }

    /// Add a closure listener. Listeners are called in subscription order.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&RegisterEvent<'_>) -> DimensionResult<()> + Send + Sync + 'static,
    {
        self.subscribe_listener(Arc::new(listener));
    }

    /// Add a listener object
    pub fn subscribe_listener(&self, listener: Arc<dyn RegisterListener>) {
        self.listeners.write().push(listener);
    }

    /// Number of subscribed listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Attach a session's registries. Replaces any previously attached
    /// session and re-arms the notification.
    pub fn attach(&self, registries: &Arc<DynamicRegistries>, server: &Arc<ServerConfiguration>) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let session = Session {
            generation,
            registries: Arc::downgrade(registries),
            server: Arc::downgrade(server),
            notified: AtomicBool::new(false),
            dispatching: AtomicBool::new(false),
            pending: Mutex::new(Vec::new()),
        };

        let previous = self.session.write().replace(session);
        if previous.is_some() {
            debug!("Replaced stale dimension session with session {}", generation);
        } else {
            debug!("Attached dimension session {} for level '{}'", generation, server.level_name());
        }
    }

    /// Detach the current session. Returns `false` if none was attached.
    pub fn detach(&self) -> bool {
        match self.session.write().take() {
            Some(session) => {
                debug!("Detached dimension session {}", session.generation);
                true
            }
            None => false,
        }
    }

    /// Whether registration and lookups are possible right now
    pub fn is_ready(&self) -> bool {
        self.session.read().as_ref().map_or(false, Session::is_alive)
    }

    /// Fire the registration notification for the attached session.
    ///
    /// Listeners run synchronously on this thread in subscription order. A
    /// failing listener is logged and does not stop the others.
    pub fn notify_ready(&self) -> DimensionResult<Notified> {
        let generation = {
            let guard = self.session.read();
            let session = match guard.as_ref().filter(|s| s.is_alive()) {
                Some(session) => session,
                None => {
                    warn!("Registration notification fired with no session attached");
                    return Err(DimensionError::PreconditionFailed(
                        "notify_ready called before attach".into(),
                    ));
                }
            };

            if session.notified.swap(true, Ordering::AcqRel) {
                warn!("Registration notification fired twice for session {}", session.generation);
                if self.config.reject_repeat_notify {
                    return Err(DimensionError::PreconditionFailed(
                        "notify_ready already fired for this session".into(),
                    ));
                }
                return Ok(Notified::default());
            }

            session.dispatching.store(true, Ordering::Release);
            session.generation
        };

        // Snapshot so listeners may subscribe more listeners without deadlock
        let listeners: Vec<_> = self.listeners.read().clone();
        info!("Opening dimension registration for {} listener(s)", listeners.len());

        let _dispatch = DispatchGuard {
            manager: self,
            generation,
        };
        let event = RegisterEvent::new(self);
        let mut notified = Notified::default();
        for listener in &listeners {
            notified.listeners += 1;
            if let Err(e) = listener.on_register(&event) {
                notified.failed += 1;
                warn!("Dimension registration listener failed: {}", e);
            }
        }

        Ok(notified)
    }

    fn with_session<R>(&self, f: impl FnOnce(&Attached<'_>) -> DimensionResult<R>) -> DimensionResult<R> {
        let guard = self.session.read();
        let attached = guard
            .as_ref()
            .and_then(Session::upgrade)
            .ok_or(DimensionError::NotReady)?;
        f(&attached)
    }

    /// Register a world definition under `location`.
    ///
    /// Returns `true` if it was stored. A location that already has a
    /// definition keeps it and `false` is returned.
    pub fn register_world(
        &self,
        location: impl Into<Identifier>,
        definition: WorldDefinition,
    ) -> DimensionResult<bool> {
        let location = location.into();
        self.with_session(|attached| {
            let worlds = attached.server.worlds();
            let key = worlds.derive_key(&location)?;

            if !worlds.insert_if_absent(key, definition) {
                trace!("World {} already registered, keeping existing definition", location);
                return Ok(false);
            }

            if self.config.log_registrations {
                debug!("Registered world {}", location);
            }
            if self.config.autoload_registered && attached.session.dispatching.load(Ordering::Acquire) {
                attached.session.pending.lock().push(location.clone());
            }
            Ok(true)
        })
    }

    /// Identifiers of every registered world, in registration order
    pub fn registered_worlds(&self) -> DimensionResult<Vec<Identifier>> {
        self.with_session(|attached| {
            Ok(attached
                .server
                .worlds()
                .keys()
                .into_iter()
                .map(|key| key.location().clone())
                .collect())
        })
    }

    /// Worlds registered during the notification that are not loaded yet
    pub fn pending_worlds(&self) -> DimensionResult<Vec<Identifier>> {
        self.with_session(|attached| Ok(attached.session.pending.lock().clone()))
    }

    /// The definition registered under `location`
    pub fn lookup_world(&self, location: impl Into<Identifier>) -> DimensionResult<Option<Arc<WorldDefinition>>> {
        let location = location.into();
        self.with_session(|attached| lookup(attached.server.worlds(), &location))
    }

    /// The world-type descriptor registered under `location`
    pub fn lookup_world_type(&self, location: impl Into<Identifier>) -> DimensionResult<Option<Arc<WorldType>>> {
        let location = location.into();
        self.with_session(|attached| lookup(attached.registries.world_types(), &location))
    }

    /// The generation settings registered under `location`
    pub fn lookup_settings(
        &self,
        location: impl Into<Identifier>,
    ) -> DimensionResult<Option<Arc<GenerationSettings>>> {
        let location = location.into();
        self.with_session(|attached| lookup(attached.registries.settings(), &location))
    }

    /// The biome registered under `location`
    pub fn lookup_biome(&self, location: impl Into<Identifier>) -> DimensionResult<Option<Arc<Biome>>> {
        let location = location.into();
        self.with_session(|attached| lookup(attached.registries.biomes(), &location))
    }

    /// Bring the world registered under `location` online.
    ///
    /// Resolution happens under the session lock; the host is called after
    /// the lock is released so it may call back into the manager.
    pub fn activate_world<H: WorldHost>(&self, host: &mut H, location: impl Into<Identifier>) -> DimensionResult<()> {
        let location = location.into();
        let request = self.with_session(|attached| attached.resolve(&location))?;

        info!(
            "Loading world {} (type {}, settings {})",
            location,
            request.definition.world_type.location(),
            request.definition.settings.location()
        );

        host.load_world(request).map_err(|e| {
            warn!("Host failed to load world {}: {}", location, e);
            DimensionError::Host {
                world: location.clone(),
                message: e.to_string(),
            }
        })
    }

    /// Activate every pending world in registration order.
    ///
    /// On failure the failing world and the ones after it stay pending,
    /// unless the session was replaced in the meantime.
    pub fn load_pending_worlds<H: WorldHost>(&self, host: &mut H) -> DimensionResult<usize> {
        let (generation, pending) = self.with_session(|attached| {
            let pending = std::mem::take(&mut *attached.session.pending.lock());
            Ok((attached.session.generation, pending))
        })?;

        for (loaded, location) in pending.iter().enumerate() {
            if let Err(e) = self.activate_world(host, location) {
                let rest = pending[loaded..].to_vec();
                // Requeue only into the session the worlds were registered in
                let _ = self.with_session(|attached| {
                    if attached.session.generation != generation {
                        debug!("Dropping {} pending world(s) of ended session {}", rest.len(), generation);
                        return Ok(());
                    }
                    let mut queue = attached.session.pending.lock();
                    let newer = std::mem::replace(&mut *queue, rest);
                    queue.extend(newer);
                    Ok(())
                });
                return Err(e);
            }
        }

        if !pending.is_empty() {
            info!("Loaded {} pending world(s)", pending.len());
        }
        Ok(pending.len())
    }

    /// Live worlds whose type is `world_type`, in the host's order.
    ///
    /// Worlds are matched by world-type key, so equal identifiers match
    /// regardless of which descriptor instance a world was built from.
    pub fn find_worlds_of_type<'h, H: WorldHost>(
        &self,
        host: &'h H,
        world_type: impl Into<Identifier>,
    ) -> DimensionResult<WorldsOfType<'h, H>> {
        let world_type = world_type.into();
        let key = self.with_session(|_| Ok(RegistryKey::<WorldType>::derive(&world_type)?))?;
        Ok(WorldsOfType::new(host, key))
    }

    /// The live world the host holds under `location`.
    ///
    /// Needs no session: it only derives the world key and asks the host.
    pub fn live_world<'h, H: WorldHost>(
        &self,
        host: &'h H,
        location: impl Into<Identifier>,
    ) -> DimensionResult<Option<&'h H::World>> {
        let key = WorldKey::derive(&location.into())?;
        Ok(host.world(&key))
    }
}

impl Default for DimensionManager {
    fn default() -> Self {
        Self::new(DimensionConfig::default())
    }
}

impl fmt::Debug for DimensionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionManager")
            .field("ready", &self.is_ready())
            .field("listeners", &self.listener_count())
            .field("config", &self.config)
            .finish()
    }
}
