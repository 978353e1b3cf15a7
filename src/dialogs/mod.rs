//! Modal windows: probe source viewer and the settings dialog.

pub mod code;
pub mod settings;
