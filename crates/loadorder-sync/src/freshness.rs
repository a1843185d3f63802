//! Freshness arbitration between the two persisted plugin list files.
//!
//! External tools and manual edits can touch `loadorder.txt` and
//! `plugins.txt` independently, so each read must first decide which file is
//! authoritative. The decision compares file modification times against the
//! instant of the last successful synchronization.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

/// Reconciliation strategy selected for one read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The explicit order file may have changed (or no baseline exists yet);
    /// it is the richer source of truth and wins.
    UseExplicitOrder,
    /// Only the active-set file changed: an external tool rewrote
    /// active/inactive flags without updating the order, so the order must
    /// be re-derived from module file times.
    DeriveFromModTimes,
}

/// Decides which reconciliation strategy applies.
///
/// Rules, in order:
///
/// 1. Without a synchronization baseline (`last_sync == None`) the order
///    file counts as new.
/// 2. The order file is new if it does not exist or was modified strictly
///    after `last_sync`.
/// 3. The active file is new if it was modified strictly after `last_sync`;
///    an absent active file is never new.
/// 4. Order file new, or active file not new → [`Strategy::UseExplicitOrder`].
/// 5. Otherwise → [`Strategy::DeriveFromModTimes`].
///
/// "Both files stale" and "only the order file changed" deliberately share
/// the [`Strategy::UseExplicitOrder`] branch.
#[must_use]
pub fn decide(
    order_path: &Path,
    active_path: &Path,
    last_sync: Option<DateTime<Utc>>,
) -> Strategy {
    let order_is_new = match (last_sync, modified(order_path)) {
        (None, _) | (_, None) => true,
        (Some(sync), Some(mtime)) => mtime > sync,
    };
    let active_is_new = match (last_sync, modified(active_path)) {
        (None, _) => true,
        (_, None) => false,
        (Some(sync), Some(mtime)) => mtime > sync,
    };

    if order_is_new || !active_is_new {
        Strategy::UseExplicitOrder
    } else {
        Strategy::DeriveFromModTimes
    }
}

/// Modification time of a file, or `None` if it cannot be read.
fn modified(path: &Path) -> Option<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .ok()
        .map(DateTime::from)
}
