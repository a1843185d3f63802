//! Collaborator traits for the load-order engine.
//!
//! The engine mutates plugin state and load order only through these
//! interfaces; it never owns the records itself.
//!
//! # Module Structure
//!
//! - `registry` - Plugin-state container interface
//! - `game` - Game descriptor (primary plugins, data directory)
//! - `resolver` - Mod-directory resolution for plugin origins
//! - `report` - Non-fatal diagnostic sink

mod game;
mod registry;
mod report;
mod resolver;

pub use game::GameInfo;
pub use registry::PluginRegistry;
pub use report::{ReportSink, TracingReport};
pub use resolver::ModResolver;
