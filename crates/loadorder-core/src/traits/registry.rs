//! Plugin-state container trait.
//!
//! This module defines the `PluginRegistry` trait, the interface through
//! which the engine reads and mutates the host's plugin records.

use crate::{ModId, PluginName, PluginState};

/// The host's container of tracked plugins.
///
/// Each record carries a name, an activation state, a priority (lower loads
/// earlier) and optionally the managed mod that physically owns the plugin
/// file. The engine queries and mutates records exclusively through this
/// trait and never stores them itself.
///
/// # Contract
///
/// - Name lookups follow the case-insensitive identity of
///   [`PluginName`].
/// - [`state`](Self::state) reports [`PluginState::Missing`] for names the
///   container does not track; the engine treats `Missing` as untouchable.
/// - [`set_state`](Self::set_state) on an untracked name is a no-op; whether
///   the container starts tracking such names is the host's decision.
///
/// # Examples
///
/// ```
/// use loadorder_core::{MemoryRegistry, PluginName, PluginState};
/// use loadorder_core::traits::PluginRegistry;
///
/// let mut registry = MemoryRegistry::new();
/// registry.insert(PluginName::new("Skyrim.esm"), PluginState::Active, None);
/// registry.insert(PluginName::new("MyMod.esp"), PluginState::Inactive, None);
///
/// assert_eq!(registry.state(&PluginName::new("skyrim.esm")), PluginState::Active);
/// assert_eq!(registry.state(&PluginName::new("unknown.esp")), PluginState::Missing);
///
/// registry.set_load_order(&[PluginName::new("MyMod.esp"), PluginName::new("Skyrim.esm")]);
/// assert_eq!(registry.priority(&PluginName::new("MyMod.esp")), 0);
/// ```
pub trait PluginRegistry {
    /// Returns the names of all tracked plugins, lowest priority first.
    fn plugin_names(&self) -> Vec<PluginName>;

    /// Returns the state of a plugin, or [`PluginState::Missing`] for names
    /// the container does not track.
    fn state(&self, name: &PluginName) -> PluginState;

    /// Sets the state of a tracked plugin. Untracked names are ignored.
    fn set_state(&mut self, name: &PluginName, state: PluginState);

    /// Returns the load priority of a plugin; lower values load earlier.
    ///
    /// Untracked names report `-1`.
    fn priority(&self, name: &PluginName) -> i32;

    /// Returns the managed mod owning the plugin's file, or `None` when the
    /// file lives in the base game data directory.
    fn origin(&self, name: &PluginName) -> Option<ModId>;

    /// Replaces the load order: each tracked plugin named in `order` gets the
    /// priority of its position.
    fn set_load_order(&mut self, order: &[PluginName]);
}
