//! Load-order reconciliation for plugin-based games.
//!
//! A game exposes two persisted artifacts describing its add-on content
//! modules: `loadorder.txt` records an explicit total order, `plugins.txt`
//! records which plugins are active (implicitly, in file order). External
//! tools and manual edits can touch either file at any time, so both can go
//! stale relative to each other and to the host's in-memory model. This
//! crate decides per read which file is authoritative, reconstructs one
//! canonical ordered plugin list with active/inactive/missing state, and
//! persists it back to both files atomically and only when changed.
//!
//! # Architecture
//!
//! - [`freshness`] - decides per read which reconciliation strategy applies,
//!   comparing file modification times against the last synchronization
//! - `reconcile` (internal) - builds the canonical order from the explicit
//!   order file, or derives it from module file times, then assigns active
//!   states from the active-set file
//! - [`writer`] - priority-sorted, filtered, encoded list output; commits
//!   through a temporary file and only when the content fingerprint changed
//! - [`sync`] - [`GamePluginSync`], the per-profile entry point tying the
//!   pieces together
//!
//! The host supplies its plugin-state container, game facts, mod-directory
//! resolution and error reporting through the traits in
//! [`loadorder_core::traits`]; the engine never owns plugin records.
//!
//! # File formats
//!
//! ```text
//! <profile>/
//! ├── loadorder.txt    # UTF-8, full order, one name per line, CRLF
//! └── plugins.txt      # Windows-1252, active plugins only, CRLF
//! ```
//!
//! Both start with a `#` header comment line. An absent or zero-length
//! `plugins.txt` means "no active set recorded".
//!
//! # Concurrency
//!
//! Single-threaded and synchronous: every operation is a blocking file read
//! or write, and one [`GamePluginSync`] instance per profile is assumed to
//! own interaction with the two files. There is no file locking; external
//! concurrent writers are only handled through the freshness heuristic,
//! best-effort by design.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod error;
pub mod fingerprint;
pub mod freshness;
mod reconcile;
pub mod sync;
pub mod writer;

pub use error::{Result, SyncError};
pub use freshness::Strategy;
pub use sync::{ACTIVE_FILE, GamePluginSync, ORDER_FILE};
pub use writer::{ListEncoding, ListWriter, WriteOutcome};
