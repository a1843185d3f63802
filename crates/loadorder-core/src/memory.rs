//! In-memory reference implementation of [`PluginRegistry`].
//!
//! Used by the engine's test suites and by hosts that do not already own a
//! plugin-state container.

use crate::traits::PluginRegistry;
use crate::{ModId, PluginName, PluginState};

#[derive(Debug, Clone)]
struct Entry {
    name: PluginName,
    state: PluginState,
    priority: i32,
    origin: Option<ModId>,
}

/// A plain in-memory plugin-state container.
///
/// Records are held in a `Vec`; insertion assigns the next priority, and
/// [`set_load_order`](PluginRegistry::set_load_order) reassigns priorities
/// wholesale. Lookups follow [`PluginName`]'s case-insensitive identity.
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
/// let names = registry.plugin_names();
/// assert_eq!(names[0].as_str(), "Skyrim.esm");
/// assert_eq!(registry.priority(&PluginName::new("mymod.esp")), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    entries: Vec<Entry>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plugin record with the next free priority.
    ///
    /// Inserting a name that is already tracked (ignoring case) replaces its
    /// state and origin but keeps its priority.
    pub fn insert(&mut self, name: PluginName, state: PluginState, origin: Option<ModId>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.state = state;
            entry.origin = origin;
            return;
        }
        let priority = i32::try_from(self.entries.len()).unwrap_or(i32::MAX);
        self.entries.push(Entry {
            name,
            state,
            priority,
            origin,
        });
    }

    /// Number of tracked plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no plugins are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, name: &PluginName) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == *name)
    }
}

impl PluginRegistry for MemoryRegistry {
    fn plugin_names(&self) -> Vec<PluginName> {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by_key(|e| e.priority);
        entries.into_iter().map(|e| e.name.clone()).collect()
    }

    fn state(&self, name: &PluginName) -> PluginState {
        self.find(name).map_or(PluginState::Missing, |e| e.state)
    }

    fn set_state(&mut self, name: &PluginName, state: PluginState) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == *name) {
            entry.state = state;
        }
    }

    fn priority(&self, name: &PluginName) -> i32 {
        self.find(name).map_or(-1, |e| e.priority)
    }

    fn origin(&self, name: &PluginName) -> Option<ModId> {
        self.find(name).and_then(|e| e.origin.clone())
    }

    fn set_load_order(&mut self, order: &[PluginName]) {
        for (index, name) in order.iter().enumerate() {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.name == *name) {
                entry.priority = i32::try_from(index).unwrap_or(i32::MAX);
            }
        }
    }
}
