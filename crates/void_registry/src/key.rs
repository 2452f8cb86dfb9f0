//! Typed registry keys
//!
//! A [`RegistryKey<T>`] pairs the tag of the table that stores `T` with the
//! identifier of one entry. Keys are derived, never stored on their own:
//! deriving twice from equal identifiers yields equal keys, and the type
//! parameter keeps keys for different tables apart at compile time.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RegistryResult;
use crate::identifier::Identifier;

/// A value type that lives in a registry table
pub trait Registrable: Send + Sync + 'static {
    /// Identifier of the table, in `namespace:path` form
    const REGISTRY: &'static str;

    /// The table tag as an identifier
    fn registry_id() -> Identifier {
        Identifier::from(Self::REGISTRY)
    }
}

/// A typed (table, identifier) handle
pub struct RegistryKey<T> {
    registry: &'static str,
    location: Identifier,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Registrable> RegistryKey<T> {
    /// Derive the key for `location` in the table of `T`.
    ///
    /// Fails with `InvalidIdentifier` if the location is malformed.
    pub fn derive(location: &Identifier) -> RegistryResult<Self> {
        location.validate()?;
        Ok(Self {
            registry: T::REGISTRY,
            location: location.clone(),
            _marker: PhantomData,
        })
    }

    /// Re-derive the same location into the table of `U`
    pub fn cast<U: Registrable>(&self) -> RegistryKey<U> {
        RegistryKey {
            registry: U::REGISTRY,
            location: self.location.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> RegistryKey<T> {
    /// Tag of the table this key addresses
    #[inline]
    pub fn registry(&self) -> &'static str {
        self.registry
    }

    /// Identifier of the entry
    #[inline]
    pub fn location(&self) -> &Identifier {
        &self.location
    }
}

impl<T> Clone for RegistryKey<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry,
            location: self.location.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for RegistryKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.registry == other.registry && self.location == other.location
    }
}

impl<T> Eq for RegistryKey<T> {}

impl<T> Hash for RegistryKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.registry.hash(state);
        self.location.hash(state);
    }
}

impl<T> fmt::Debug for RegistryKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegistryKey[{} / {}]", self.registry, self.location)
    }
}

impl<T> fmt::Display for RegistryKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.registry, self.location)
    }
}

// Keys persist as their location; the table tag comes back from `T`.
impl<T> Serialize for RegistryKey<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.location.serialize(serializer)
    }
}

impl<'de, T: Registrable> Deserialize<'de> for RegistryKey<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let location = Identifier::deserialize(deserializer)?;
        Self::derive(&location).map_err(serde::de::Error::custom)
    }
}
