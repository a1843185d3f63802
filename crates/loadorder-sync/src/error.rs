//! Error types for load-order synchronization.

use std::path::PathBuf;

/// Result type for load-order synchronization operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that can occur while reconciling or persisting plugin lists.
///
/// Only [`SyncError::Io`] can surface from the public API; every other
/// variant is absorbed by a documented fallback (see
/// [`GamePluginSync`](crate::GamePluginSync)).
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    /// A write was attempted before any successful read.
    ///
    /// Writing without a read baseline would clobber list files some other
    /// tool may have edited. [`GamePluginSync::write`](crate::GamePluginSync::write)
    /// skips the write and logs instead of failing.
    #[error("plugin lists have not been read yet, refusing to write")]
    UninitializedWrite,

    /// The filtered output would contain zero plugin lines.
    ///
    /// An empty plugin list almost always indicates an upstream bug rather
    /// than an intentional truth; the write is aborted and the prior file is
    /// preserved.
    #[error("plugin list for {path} would be empty, not saving")]
    EmptyOutput {
        /// Target file of the aborted write
        path: PathBuf,
    },

    /// A plugin name cannot be represented in the target encoding.
    ///
    /// The game engine cannot load such a plugin. The writer skips the name,
    /// reports it through the host's [`ReportSink`](loadorder_core::traits::ReportSink),
    /// and keeps writing the rest of the list.
    #[error("plugin name {name:?} is not representable in {encoding}")]
    NameEncoding {
        /// The offending plugin name
        name: String,
        /// Label of the target encoding
        encoding: &'static str,
    },

    /// The explicit order file is unreadable or not valid UTF-8.
    ///
    /// The reconciler falls back to deriving the order from module file
    /// times.
    #[error("cannot read load order file {path}")]
    MalformedOrderFile {
        /// Path of the unreadable order file
        path: PathBuf,
        /// Underlying read error
        #[source]
        source: std::io::Error,
    },

    /// I/O error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Returns true if this error is absorbed by a documented fallback
    /// rather than surfaced to the caller.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
