//! Domain types and collaborator traits for game plugin load-order management.
//!
//! This crate provides the foundational types and abstractions shared by the
//! load-order engine and its embedding host.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types ([`PluginName`], [`PluginState`], [`ModId`])
//! - Collaborator traits the host implements ([`traits::PluginRegistry`],
//!   [`traits::GameInfo`], [`traits::ModResolver`], [`traits::ReportSink`])
//! - An in-memory reference container ([`MemoryRegistry`]) for tests and
//!   simple hosts
//!
//! The engine itself lives in `loadorder-sync`; everything here is
//! deliberately free of file I/O so hosts can implement the traits against
//! whatever state they already own.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod memory;
mod types;

pub mod traits;

pub use memory::MemoryRegistry;
pub use types::{ModId, PluginName, PluginState};
