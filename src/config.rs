//! Persisted application settings.
//!
//! Saved through the eframe storage hook, restored at startup.
//! CLI flags override restored values after load. Log data itself is
//! never persisted, only UI state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Double-invoke renders and remount effects on mount.
    pub strict_mode: bool,
    pub dark_mode: bool,
    /// Console text size in points.
    pub font_size: f32,
    pub show_legend: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self { strict_mode: true, dark_mode: true, font_size: 13.0, show_legend: true }
    }
}

impl AppSettings {
    /// Keep whatever comes out of storage or the settings dialog sane.
    pub fn clamp(&mut self) {
        self.font_size = self.font_size.clamp(9.0, 24.0);
    }
}

/// Default path for `--log` when no file is given.
pub fn default_log_file() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lifescope")
        .join("lifescope.log")
}
