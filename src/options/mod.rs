//! Controller configuration with TOML preset support.
//!
//! Speeds, limits, damping, mouse bindings and modifier keys are
//! consolidated here. Options serialize to/from TOML so hosts can ship
//! presets next to their assets.

mod controls;
mod keybindings;
mod mouse;

use std::path::Path;

pub use controls::ControlOptions;
pub use keybindings::KeybindingOptions;
pub use mouse::MouseBindingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TrackballError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Speeds, limits and damping.
    pub controls: ControlOptions,
    /// Mouse button → gesture bindings.
    pub mouse: MouseBindingOptions,
    /// Modifier key bindings.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(text: &str) -> Result<Self, TrackballError> {
        let mut opts: Self = toml::from_str(text)
            .map_err(|e| TrackballError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TrackballError> {
        let content =
            std::fs::read_to_string(path).map_err(TrackballError::Io)?;
        let opts = Self::from_toml(&content)?;
        log::info!("loaded control options from {}", path.display());
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TrackballError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TrackballError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TrackballError::Io)?;
        }
        std::fs::write(path, content).map_err(TrackballError::Io)?;
        log::info!("saved control options to {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
