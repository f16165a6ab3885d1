//! Editor configuration.

use std::path::PathBuf;

use glyphmap_save::WorldPaths;
use glyphmap_space::GridLayout;

use crate::error::ConfigError;

// ── EditorConfig ────────────────────────────────────────────────

/// Settings fixed for the lifetime of an
/// [`EditorSession`](crate::EditorSession).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// Where the map grid is drawn and probed.
    pub layout: GridLayout,
    /// Directory holding the world file and its region files.
    pub save_root: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout: GridLayout::default(),
            save_root: PathBuf::from("resources/world"),
        }
    }
}

impl EditorConfig {
    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Layout must map pixels to cells.
        self.layout.validate().map_err(ConfigError::Layout)?;
        // 2. A save directory must be named.
        if self.save_root.as_os_str().is_empty() {
            return Err(ConfigError::EmptySaveRoot);
        }
        Ok(())
    }

    /// File names under [`save_root`](Self::save_root).
    pub fn paths(&self) -> WorldPaths {
        WorldPaths::new(&self.save_root)
    }
}
