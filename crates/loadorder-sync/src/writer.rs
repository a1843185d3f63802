//! Atomic plugin list writer.
//!
//! Serializes an ordered, filtered plugin name sequence to a text file in a
//! chosen encoding, and commits only when the content differs from the last
//! commit for that path. Commits go through a temporary file that is
//! renamed over the target; the temporary is deleted on every other exit
//! path.

use crate::error::{Result, SyncError};
use crate::fingerprint::content_fingerprint;
use encoding_rs::WINDOWS_1252;
use loadorder_core::traits::{PluginRegistry, ReportSink};
use loadorder_core::{PluginName, PluginState};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// First line of every generated list file.
const HEADER: &str = "# This file was automatically generated by loadorder.\r\n";

/// Text encoding of a generated list file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEncoding {
    /// UTF-8, used for the explicit order file.
    Utf8,
    /// WINDOWS-1252, the engine's legacy encoding for the active-set file.
    Legacy,
}

impl ListEncoding {
    const fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Legacy => "Windows-1252",
        }
    }
}

/// Outcome of a single list write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Content changed; the target file was replaced.
    Committed,
    /// Content matches the last commit; the target was left untouched.
    Unchanged,
}

/// RAII guard for the temporary file used during a commit.
///
/// The temporary is removed on drop unless [`commit`](Self::commit) was
/// called, so every exit path releases it.
struct TempFileGuard {
    path: PathBuf,
    cleanup: bool,
}

impl TempFileGuard {
    const fn new(path: PathBuf) -> Self {
        Self {
            path,
            cleanup: true,
        }
    }

    /// Disables cleanup after the temporary was renamed over the target.
    fn commit(mut self) {
        self.cleanup = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if !self.cleanup {
            return;
        }
        // the guard may outlive a failed create, so the file can be absent
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "failed to clean up temporary file {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

/// Writes plugin list files and remembers what was last committed where.
///
/// One `ListWriter` instance belongs to one profile; its fingerprint cache
/// is what makes repeated writes of unchanged content free.
///
/// # Examples
///
/// ```
/// use loadorder_core::{MemoryRegistry, PluginName, PluginState};
/// use loadorder_core::traits::TracingReport;
/// use loadorder_sync::{ListEncoding, ListWriter, WriteOutcome};
///
/// # fn main() -> loadorder_sync::Result<()> {
/// # let dir = tempfile::tempdir().unwrap();
/// let mut registry = MemoryRegistry::new();
/// registry.insert(PluginName::new("Skyrim.esm"), PluginState::Active, None);
///
/// let mut writer = ListWriter::new();
/// let path = dir.path().join("loadorder.txt");
/// let outcome = writer.write(&registry, &path, ListEncoding::Utf8, |_, _| true, &TracingReport)?;
/// assert_eq!(outcome, WriteOutcome::Committed);
///
/// // identical content commits only once
/// let outcome = writer.write(&registry, &path, ListEncoding::Utf8, |_, _| true, &TracingReport)?;
/// assert_eq!(outcome, WriteOutcome::Unchanged);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ListWriter {
    last_commit: HashMap<PathBuf, String>,
}

impl ListWriter {
    /// Creates a writer with an empty commit-fingerprint cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fingerprint of the last committed content for `path`.
    #[must_use]
    pub fn last_fingerprint(&self, path: &Path) -> Option<&str> {
        self.last_commit.get(path).map(String::as_str)
    }

    /// Writes the filtered plugin list to `path`.
    ///
    /// The container snapshot is sorted by priority before filtering, so
    /// callers may pass an unsorted container. Names that do not encode
    /// losslessly are skipped and reported through `report`; writing
    /// continues without them.
    ///
    /// # Errors
    ///
    /// - [`SyncError::EmptyOutput`] if the filtered output would contain
    ///   zero plugin lines; the existing file is left untouched.
    /// - [`SyncError::Io`] on filesystem failures.
    pub fn write(
        &mut self,
        registry: &dyn PluginRegistry,
        path: &Path,
        encoding: ListEncoding,
        include: impl Fn(&PluginName, PluginState) -> bool,
        report: &dyn ReportSink,
    ) -> Result<WriteOutcome> {
        let mut names = registry.plugin_names();
        names.sort_by_key(|name| registry.priority(name));

        let mut buffer: Vec<u8> = Vec::with_capacity(HEADER.len() + names.len() * 16);
        buffer.extend_from_slice(HEADER.as_bytes());

        let mut written = 0usize;
        let mut unencodable: Vec<String> = Vec::new();
        for name in &names {
            if !include(name, registry.state(name)) {
                continue;
            }
            match encode_name(name, encoding) {
                Ok(bytes) => {
                    buffer.extend_from_slice(&bytes);
                    buffer.extend_from_slice(b"\r\n");
                    written += 1;
                }
                Err(err) => {
                    tracing::error!("{err}");
                    unencodable.push(name.as_str().to_string());
                }
            }
        }

        if !unencodable.is_empty() {
            report.report_error(&format!(
                "Some of your plugins have invalid names and can not be loaded by the \
                 game: {}. Please rename the affected files.",
                unencodable.join(", ")
            ));
        }

        if written == 0 {
            tracing::warn!(
                "plugin list for {} would be empty, this is almost certainly wrong - not saving",
                path.display()
            );
            return Err(SyncError::EmptyOutput {
                path: path.to_path_buf(),
            });
        }

        self.commit_if_different(path, &buffer, written)
    }

    /// Writes `buffer` to a temporary file next to `path` and renames it
    /// over the target, unless the content fingerprint matches the last
    /// commit for that path.
    fn commit_if_different(
        &mut self,
        path: &Path,
        buffer: &[u8],
        written: usize,
    ) -> Result<WriteOutcome> {
        let temp_path = path.with_extension("tmp");
        let guard = TempFileGuard::new(temp_path.clone());
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(buffer)?;
            file.sync_all()?;
        }

        let fingerprint = content_fingerprint(buffer);
        if self.last_commit.get(path) == Some(&fingerprint) {
            tracing::debug!("content of {} unchanged, skipping commit", path.display());
            return Ok(WriteOutcome::Unchanged);
        }

        fs::rename(&temp_path, path)?;
        guard.commit();
        self.last_commit.insert(path.to_path_buf(), fingerprint);
        tracing::debug!("committed {} plugin(s) to {}", written, path.display());
        Ok(WriteOutcome::Committed)
    }
}

/// Encodes a plugin name for the target encoding, refusing lossy output.
fn encode_name(name: &PluginName, encoding: ListEncoding) -> Result<Vec<u8>> {
    match encoding {
        ListEncoding::Utf8 => Ok(name.as_str().as_bytes().to_vec()),
        ListEncoding::Legacy => {
            let (bytes, _, unmappable) = WINDOWS_1252.encode(name.as_str());
            if unmappable {
                return Err(SyncError::NameEncoding {
                    name: name.as_str().to_string(),
                    encoding: ListEncoding::Legacy.label(),
                });
            }
            Ok(bytes.into_owned())
        }
    }
}
