//! Custom element names and one-time registration
//!
//! A widget is registered once under a stable name. The registry enforces
//! the naming rules browsers apply to custom elements and refuses to define
//! the same name twice.

use std::collections::BTreeSet;
use std::fmt;

/// Registration failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Name is not a valid custom element name
    InvalidName { name: String, reason: &'static str },
    /// Name was already defined
    AlreadyDefined(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidName { name, reason } => {
                write!(f, "invalid element name `{}`: {}", name, reason)
            }
            RegistryError::AlreadyDefined(name) => {
                write!(f, "element `{}` is already defined", name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// A validated custom element name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementName(String);

impl ElementName {
    /// Validate a custom element name: starts with a lowercase ASCII letter,
    /// contains a hyphen, and uses only `[a-z0-9._-]`.
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        let invalid = |reason| RegistryError::InvalidName {
            name: name.to_string(),
            reason,
        };

        let first = name.chars().next().ok_or_else(|| invalid("name is empty"))?;
        if !first.is_ascii_lowercase() {
            return Err(invalid("must start with a lowercase ASCII letter"));
        }
        if !name.contains('-') {
            return Err(invalid("must contain a hyphen"));
        }
        if let Some(bad) = name
            .chars()
            .find(|&c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_')))
        {
            log::debug!("Rejected element name {:?} (character {:?})", name, bad);
            return Err(invalid("may only contain a-z, 0-9, '-', '.' and '_'"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Names defined so far in this process
#[derive(Debug, Default)]
pub struct ElementRegistry {
    defined: BTreeSet<ElementName>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a name. Fails if invalid or already taken.
    pub fn define(&mut self, name: &str) -> Result<ElementName, RegistryError> {
        let name = ElementName::parse(name)?;
        if self.defined.contains(&name) {
            return Err(RegistryError::AlreadyDefined(name.0));
        }
        self.defined.insert(name.clone());
        Ok(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.iter().any(|n| n.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.defined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defined.is_empty()
    }
}
