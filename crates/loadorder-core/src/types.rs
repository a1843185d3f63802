//! Strong domain types for plugin load-order management.
//!
//! This module implements the newtype pattern to provide type safety for
//! domain primitives, most importantly [`PluginName`], whose identity is
//! case-insensitive. Equality and hashing are centralized here so the rule
//! is never reimplemented at comparison sites.
//!
//! # Examples
//!
//! ```
//! use loadorder_core::{PluginName, PluginState};
//!
//! let a = PluginName::new("Skyrim.esm");
//! let b = PluginName::new("SKYRIM.ESM");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "Skyrim.esm"); // original case preserved
//!
//! let state = PluginState::Active;
//! assert!(state.is_active());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Plugin file name (newtype over `String`).
///
/// Two names identify the same plugin if they are equal ignoring case, the
/// identity rule the game engine applies to plugin files on disk. The name
/// keeps the case it was constructed with; only equality and hashing
/// normalize.
///
/// # Examples
///
/// ```
/// use loadorder_core::PluginName;
/// use std::collections::HashSet;
///
/// let mut seen = HashSet::new();
/// seen.insert(PluginName::new("Update.esm"));
/// assert!(seen.contains(&PluginName::new("update.ESM")));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginName(String);

impl PluginName {
    /// Creates a new plugin name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice, in its original case.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PluginName` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the lowercased identity key.
    ///
    /// Useful when a plain `HashSet<String>` of already-seen names is more
    /// convenient than a set of `PluginName`s.
    #[must_use]
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for PluginName {
    fn eq(&self, other: &Self) -> bool {
        self.0
            .chars()
            .flat_map(char::to_lowercase)
            .eq(other.0.chars().flat_map(char::to_lowercase))
    }
}

impl Eq for PluginName {}

impl Hash for PluginName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.0.chars().flat_map(char::to_lowercase) {
            state.write_u32(u32::from(c));
        }
        // length-independent terminator, mirrors str's prefix-free hashing
        state.write_u8(0xff);
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PluginName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PluginName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Activation state of a tracked plugin.
///
/// `Missing` marks a plugin the host still references (a dependency, a stale
/// record) whose file is not physically present. The load-order engine never
/// assigns `Missing` and never overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginState {
    /// The game will load this plugin.
    Active,
    /// Installed but not loaded.
    Inactive,
    /// Referenced but not physically present.
    Missing,
}

impl PluginState {
    /// Returns true if the plugin will be loaded by the game.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true if the plugin's file is not physically present.
    #[inline]
    #[must_use]
    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Identifier of the managed mod that owns a plugin file (newtype over
/// `String`).
///
/// Resolved to a directory path through
/// [`ModResolver`](crate::traits::ModResolver); a plugin with no origin lives
/// in the base game data directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModId(String);

impl ModId {
    /// Creates a new mod identifier.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
