//! Namespaced identifiers
//!
//! An [`Identifier`] names a registrable concept as `namespace:path`. Text
//! without a `:` falls into [`DEFAULT_NAMESPACE`].
//!
//! Building an identifier never fails. Validation is deferred to the point
//! where an identifier is turned into a registry key, so that callers can
//! pass plain strings around and get a single, typed failure at the boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Namespace used when the textual form carries none
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Separator between namespace and path
pub const SEPARATOR: char = ':';

/// A namespaced name, compared structurally by (namespace, path)
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Identifier {
    namespace: Box<str>,
    path: Box<str>,
}

impl Identifier {
    /// Create an identifier from its two components.
    ///
    /// The components are stored as given; call [`Identifier::validate`] (or
    /// derive a key) to check them.
    pub fn new(namespace: impl AsRef<str>, path: impl AsRef<str>) -> Self {
        Self {
            namespace: namespace.as_ref().into(),
            path: path.as_ref().into(),
        }
    }

    /// Create an identifier in the default namespace
    pub fn vanilla(path: impl AsRef<str>) -> Self {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    /// Parse and validate `namespace:path` text
    pub fn parse(text: &str) -> RegistryResult<Self> {
        let id = Self::from(text);
        id.validate()?;
        Ok(id)
    }

    /// The namespace component
    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path component
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Check the namespacing rule: both parts non-empty, namespace in
    /// `[a-z0-9_.-]`, path in `[a-z0-9_.-/]`.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.namespace.is_empty() {
            return Err(self.invalid("namespace is empty"));
        }
        if self.path.is_empty() {
            return Err(self.invalid("path is empty"));
        }
        if let Some(c) = self.namespace.chars().find(|&c| !is_namespace_char(c)) {
            return Err(self.invalid(format!("invalid character {:?} in namespace", c)));
        }
        if let Some(c) = self.path.chars().find(|&c| !is_path_char(c)) {
            return Err(self.invalid(format!("invalid character {:?} in path", c)));
        }
        Ok(())
    }

    /// Whether [`Identifier::validate`] would succeed
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn invalid(&self, reason: impl Into<String>) -> RegistryError {
        RegistryError::InvalidIdentifier {
            identifier: self.to_string(),
            reason: reason.into(),
        }
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, SEPARATOR, self.path)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self)
    }
}

impl From<&str> for Identifier {
    fn from(text: &str) -> Self {
        match text.split_once(SEPARATOR) {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::vanilla(text),
        }
    }
}

impl From<String> for Identifier {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<&Identifier> for Identifier {
    fn from(id: &Identifier) -> Self {
        id.clone()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

impl FromStr for Identifier {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        let id = Identifier::parse("mod:skylands").unwrap();
        assert_eq!(id.namespace(), "mod");
        assert_eq!(id.path(), "skylands");
        assert_eq!(id.to_string(), "mod:skylands");
    }

    #[test]
    fn test_default_namespace() {
        let id = Identifier::from("overworld");
        assert_eq!(id.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(id, Identifier::vanilla("overworld"));
    }

    #[test]
    fn test_structural_equality() {
        let a = Identifier::new("mod", "test_dim");
        let b = Identifier::from(String::from("mod:test_dim"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_path_may_contain_slashes() {
        assert!(Identifier::from("minecraft:worldgen/noise_settings").is_valid());
        assert!(!Identifier::from("mine/craft:overworld").is_valid());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Identifier::parse(":skylands").is_err());
        assert!(Identifier::parse("mod:").is_err());
        assert!(Identifier::parse("Mod:Skylands").is_err());
        assert!(Identifier::parse("mod:sky lands").is_err());

        let err = Identifier::parse("mod:").unwrap_err();
        assert!(err.to_string().contains("path is empty"));
    }

    #[test]
    fn test_serializes_as_string() {
        let id = Identifier::new("mod", "skylands");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"mod:skylands\"");

        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
