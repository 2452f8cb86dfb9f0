//! # void_registry - Keyed Registry Tables
//!
//! Registration primitives shared by every session-scoped table in the
//! engine:
//! - **Identifier**: a `namespace:path` name, equal by its components
//! - **RegistryKey**: an identifier tagged with the table it addresses
//! - **RegistryTable**: an insert-if-absent map from keys to shared values
//!
//! ## Key derivation
//!
//! ```text
//! "mod:skylands" ──► Identifier ──► RegistryKey<WorldDefinition>  (minecraft:dimension)
//!                              └──► RegistryKey<World>            (minecraft:world)
//! ```
//!
//! One identifier yields a family of keys, one per table. Derivation is pure,
//! so keys built from equal identifiers always compare equal.

pub mod error;
pub mod identifier;
pub mod key;
pub mod table;

pub use error::{RegistryError, RegistryResult};
pub use identifier::{Identifier, DEFAULT_NAMESPACE, SEPARATOR};
pub use key::{Registrable, RegistryKey};
pub use table::RegistryTable;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{RegistryError, RegistryResult};
    pub use crate::identifier::Identifier;
    pub use crate::key::{Registrable, RegistryKey};
    pub use crate::table::RegistryTable;
}
