//! Load-order reconciliation.
//!
//! Produces the canonical ordered plugin list from either the explicit order
//! file or, when none is authoritative, from the modification times of the
//! underlying plugin modules. Both paths end in the shared active-state
//! assignment driven by the active-set file.

use chrono::{DateTime, Utc};
use encoding_rs::WINDOWS_1252;
use loadorder_core::traits::{GameInfo, ModResolver, PluginRegistry};
use loadorder_core::{PluginName, PluginState};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};

/// Reads the explicit order file into a canonical order.
///
/// Output is the primary set followed by every listed name not already seen
/// case-insensitively (in the primary set or earlier in the file), in file
/// order. Names only present in the active-set file are NOT appended here;
/// they surface through the active-state assignment if the container tracks
/// them.
///
/// # Errors
///
/// [`SyncError::MalformedOrderFile`] if the file cannot be opened or is not
/// valid UTF-8; the caller falls back to [`derive_order`].
pub(crate) fn read_explicit_order(
    path: &Path,
    primary: &[PluginName],
) -> Result<Vec<PluginName>> {
    let content = fs::read_to_string(path).map_err(|source| SyncError::MalformedOrderFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut seen: HashSet<String> = primary.iter().map(PluginName::key).collect();
    let mut order: Vec<PluginName> = primary.to_vec();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let name = PluginName::new(line);
        if seen.insert(name.key()) {
            order.push(name);
        }
    }
    Ok(order)
}

/// Derives a canonical order from module file times.
///
/// The container's plugins are partitioned into primaries (pinned to the
/// front in primary-set order) and the remainder, which is sorted ascending
/// by the modification time of each plugin's resolved module file:
/// earlier-installed loads first. The sort is stable, so ties keep the
/// container's order; modules whose time cannot be read sort first.
pub(crate) fn derive_order(
    registry: &dyn PluginRegistry,
    game: &dyn GameInfo,
    mods: &dyn ModResolver,
) -> Vec<PluginName> {
    let primary = game.primary_plugins();
    let primary_keys: HashSet<String> = primary.iter().map(PluginName::key).collect();

    let tracked = registry.plugin_names();
    let tracked_keys: HashSet<String> = tracked.iter().map(PluginName::key).collect();

    let mut order: Vec<PluginName> = primary
        .into_iter()
        .filter(|name| tracked_keys.contains(&name.key()))
        .collect();

    let mut remainder: Vec<PluginName> = tracked
        .into_iter()
        .filter(|name| !primary_keys.contains(&name.key()))
        .collect();
    remainder.sort_by_key(|name| module_mtime(name, registry, game, mods));

    order.append(&mut remainder);
    order
}

/// Forces every primary plugin whose file is present to `Active`.
pub(crate) fn force_primary_active(registry: &mut dyn PluginRegistry, primary: &[PluginName]) {
    for name in primary {
        if !registry.state(name).is_missing() {
            registry.set_state(name, PluginState::Active);
        }
    }
}

/// Assigns active/inactive states from the active-set file.
///
/// Every line of the file names an active plugin; every non-primary name in
/// the canonical order not named by a line becomes `Inactive`. When the file
/// is absent, empty or unreadable, no active set is recorded and every
/// non-primary name in the canonical order becomes `Inactive`. `Missing`
/// records are never touched.
pub(crate) fn assign_active_states(
    registry: &mut dyn PluginRegistry,
    order: &[PluginName],
    primary: &[PluginName],
    active_path: &Path,
) {
    let primary_keys: HashSet<String> = primary.iter().map(PluginName::key).collect();

    if let Some(active) = read_active_set(active_path) {
        for name in &active.names {
            if !registry.state(name).is_missing() {
                registry.set_state(name, PluginState::Active);
            }
        }
        for name in order {
            if primary_keys.contains(&name.key()) || active.keys.contains(&name.key()) {
                continue;
            }
            if !registry.state(name).is_missing() {
                registry.set_state(name, PluginState::Inactive);
            }
        }
    } else {
        tracing::debug!(
            "no active set recorded at {}, deactivating non-primary plugins",
            active_path.display()
        );
        for name in order {
            if primary_keys.contains(&name.key()) {
                continue;
            }
            if !registry.state(name).is_missing() {
                registry.set_state(name, PluginState::Inactive);
            }
        }
    }
}

struct ActiveSet {
    names: Vec<PluginName>,
    keys: HashSet<String>,
}

/// Reads the active-set file; `None` means "no active set recorded"
/// (absent, zero-length or undecodable file).
fn read_active_set(path: &Path) -> Option<ActiveSet> {
    let bytes = fs::read(path).ok()?;
    // a generated file always holds at least the header; fully empty means broken
    if bytes.is_empty() {
        return None;
    }

    let (text, _, had_errors) = WINDOWS_1252.decode(&bytes);
    if had_errors {
        return None;
    }

    let mut names = Vec::new();
    let mut keys = HashSet::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let name = PluginName::new(line);
        keys.insert(name.key());
        names.push(name);
    }
    Some(ActiveSet { names, keys })
}

/// Resolves the directory owning a plugin's module file: its origin mod if
/// known, the base game data directory otherwise.
fn module_path(
    name: &PluginName,
    registry: &dyn PluginRegistry,
    game: &dyn GameInfo,
    mods: &dyn ModResolver,
) -> PathBuf {
    let dir = registry
        .origin(name)
        .and_then(|origin| mods.mod_owning(&origin))
        .unwrap_or_else(|| game.data_directory());
    dir.join(name.as_str())
}

fn module_mtime(
    name: &PluginName,
    registry: &dyn PluginRegistry,
    game: &dyn GameInfo,
    mods: &dyn ModResolver,
) -> Option<DateTime<Utc>> {
    fs::metadata(module_path(name, registry, game, mods))
        .and_then(|metadata| metadata.modified())
        .ok()
        .map(DateTime::from)
}
