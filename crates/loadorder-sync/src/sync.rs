//! Per-profile synchronization of the on-disk plugin lists.
//!
//! [`GamePluginSync`] owns the process-wide mutable state of one profile:
//! the synchronization timestamp and the writer's commit-fingerprint cache.
//! Construct a fresh instance on profile switch; there are no hidden
//! singletons.

use crate::error::{Result, SyncError};
use crate::freshness::{self, Strategy};
use crate::reconcile;
use crate::writer::{ListEncoding, ListWriter, WriteOutcome};
use chrono::{DateTime, Utc};
use loadorder_core::PluginName;
use loadorder_core::traits::{GameInfo, ModResolver, PluginRegistry, ReportSink};
use std::fmt;
use std::path::{Path, PathBuf};

/// File name of the active-set list, fixed by engine convention.
pub const ACTIVE_FILE: &str = "plugins.txt";

/// File name of the explicit order list, fixed by engine convention.
pub const ORDER_FILE: &str = "loadorder.txt";

/// Reconciles a profile's plugin lists between disk and the host's
/// plugin-state container.
///
/// # Examples
///
/// ```no_run
/// use loadorder_core::traits::{GameInfo, ModResolver, TracingReport};
/// use loadorder_core::{MemoryRegistry, ModId, PluginName};
/// use loadorder_sync::GamePluginSync;
/// use std::path::PathBuf;
///
/// struct Skyrim;
/// impl GameInfo for Skyrim {
///     fn primary_plugins(&self) -> Vec<PluginName> {
///         vec![PluginName::new("Skyrim.esm"), PluginName::new("Update.esm")]
///     }
///     fn data_directory(&self) -> PathBuf {
///         PathBuf::from("C:/Games/Skyrim/Data")
///     }
/// }
///
/// struct NoMods;
/// impl ModResolver for NoMods {
///     fn mod_owning(&self, _origin: &ModId) -> Option<PathBuf> {
///         None
///     }
/// }
///
/// # fn main() -> loadorder_sync::Result<()> {
/// let mut registry = MemoryRegistry::new();
/// let mut sync = GamePluginSync::new(
///     "C:/profiles/default",
///     Box::new(Skyrim),
///     Box::new(NoMods),
///     Box::new(TracingReport),
/// );
///
/// let order = sync.read(&mut registry);
/// println!("reconciled {} plugin(s)", order.len());
/// // ... host mutates states and order through the registry ...
/// sync.write(&registry)?;
/// # Ok(())
/// # }
/// ```
pub struct GamePluginSync {
    game: Box<dyn GameInfo>,
    mods: Box<dyn ModResolver>,
    report: Box<dyn ReportSink>,
    profile_dir: PathBuf,
    last_sync: Option<DateTime<Utc>>,
    writer: ListWriter,
}

impl GamePluginSync {
    /// Creates a synchronizer for the profile directory containing
    /// `plugins.txt` and `loadorder.txt`.
    #[must_use]
    pub fn new(
        profile_dir: impl Into<PathBuf>,
        game: Box<dyn GameInfo>,
        mods: Box<dyn ModResolver>,
        report: Box<dyn ReportSink>,
    ) -> Self {
        Self {
            game,
            mods,
            report,
            profile_dir: profile_dir.into(),
            last_sync: None,
            writer: ListWriter::new(),
        }
    }

    /// Reads both list files, reconciles them into the canonical order,
    /// pushes order and states into the container, and refreshes the
    /// synchronization baseline.
    ///
    /// Never fails: an unreadable or malformed order file falls back to the
    /// time-derived order, and a missing active-set file deactivates every
    /// non-primary plugin.
    pub fn read(&mut self, registry: &mut dyn PluginRegistry) -> Vec<PluginName> {
        let strategy = self.strategy();
        let order = self.canonical_order(registry, strategy);
        registry.set_load_order(&order);

        let primary = self.game.primary_plugins();
        reconcile::force_primary_active(registry, &primary);
        reconcile::assign_active_states(registry, &order, &primary, &self.active_path());

        self.last_sync = Some(Utc::now());
        tracing::debug!(
            "reconciled {} plugin(s) for {} via {:?}",
            order.len(),
            self.profile_dir.display(),
            strategy
        );
        order
    }

    /// Answers the canonical load order without mutating the container's
    /// states, the list files or the synchronization baseline.
    #[must_use]
    pub fn load_order(&self, registry: &dyn PluginRegistry) -> Vec<PluginName> {
        let strategy = self.strategy();
        self.canonical_order(registry, strategy)
    }

    /// Persists the container's current state to both list files: the
    /// active-set file with only active plugins, then the full order file.
    ///
    /// A write before any successful [`read`](Self::read) is skipped
    /// silently - without a baseline it would clobber files some other tool
    /// may own. An empty filtered list aborts that file's write and keeps
    /// the previous content.
    ///
    /// # Errors
    ///
    /// [`SyncError::Io`] on filesystem failures.
    pub fn write(&mut self, registry: &dyn PluginRegistry) -> Result<()> {
        if let Err(err) = self.check_initialized() {
            tracing::debug!("skipping plugin list write: {err}");
            return Ok(());
        }

        let active_path = self.active_path();
        let result = self.writer.write(
            registry,
            &active_path,
            ListEncoding::Legacy,
            |_, state| state.is_active(),
            self.report.as_ref(),
        );
        Self::tolerate_empty(result, self.report.as_ref())?;

        let order_path = self.order_path();
        let result = self.writer.write(
            registry,
            &order_path,
            ListEncoding::Utf8,
            |_, _| true,
            self.report.as_ref(),
        );
        Self::tolerate_empty(result, self.report.as_ref())?;

        self.last_sync = Some(Utc::now());
        Ok(())
    }

    /// Instant of the last successful synchronization, if any.
    #[must_use]
    pub const fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.last_sync
    }

    fn strategy(&self) -> Strategy {
        freshness::decide(&self.order_path(), &self.active_path(), self.last_sync)
    }

    fn canonical_order(
        &self,
        registry: &dyn PluginRegistry,
        strategy: Strategy,
    ) -> Vec<PluginName> {
        match strategy {
            Strategy::UseExplicitOrder => {
                match reconcile::read_explicit_order(&self.order_path(), &self.game.primary_plugins())
                {
                    Ok(order) => order,
                    Err(err) => {
                        tracing::debug!("falling back to derived order: {err}");
                        reconcile::derive_order(registry, self.game.as_ref(), self.mods.as_ref())
                    }
                }
            }
            Strategy::DeriveFromModTimes => {
                reconcile::derive_order(registry, self.game.as_ref(), self.mods.as_ref())
            }
        }
    }

    fn check_initialized(&self) -> Result<()> {
        if self.last_sync.is_none() {
            return Err(SyncError::UninitializedWrite);
        }
        Ok(())
    }

    fn tolerate_empty(result: Result<WriteOutcome>, report: &dyn ReportSink) -> Result<()> {
        match result {
            Ok(_) => Ok(()),
            Err(SyncError::EmptyOutput { path }) => {
                report.report_error(&format!(
                    "Refusing to write an empty plugin list to {}; the previous file \
                     was kept.",
                    path.display()
                ));
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn active_path(&self) -> PathBuf {
        self.profile_dir.join(ACTIVE_FILE)
    }

    fn order_path(&self) -> PathBuf {
        self.profile_dir.join(ORDER_FILE)
    }
}

impl fmt::Debug for GamePluginSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GamePluginSync")
            .field("profile_dir", &self.profile_dir)
            .field("last_sync", &self.last_sync)
            .finish_non_exhaustive()
    }
}
