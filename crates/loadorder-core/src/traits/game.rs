//! Game descriptor trait.

use crate::PluginName;
use std::path::PathBuf;

/// Static facts about the managed game.
///
/// # Examples
///
/// ```
/// use loadorder_core::PluginName;
/// use loadorder_core::traits::GameInfo;
/// use std::path::PathBuf;
///
/// struct Skyrim;
///
/// impl GameInfo for Skyrim {
///     fn primary_plugins(&self) -> Vec<PluginName> {
///         vec![PluginName::new("Skyrim.esm"), PluginName::new("Update.esm")]
///     }
///
///     fn data_directory(&self) -> PathBuf {
///         PathBuf::from("C:/Games/Skyrim/Data")
///     }
/// }
///
/// assert!(!Skyrim.supports_light_plugins());
/// ```
pub trait GameInfo {
    /// Plugins built into the game itself, in their fixed load order.
    ///
    /// Primary plugins are pinned to the front of every canonical order,
    /// never reordered, and forced active whenever their files are present.
    fn primary_plugins(&self) -> Vec<PluginName>;

    /// The base game data directory, home of plugins owned by no mod.
    fn data_directory(&self) -> PathBuf;

    /// Whether this game family supports light (ESL-flavored) plugins.
    fn supports_light_plugins(&self) -> bool {
        false
    }
}
