//! Lifecycle console widget: grouped event log with collapsible phases.

mod console;
pub mod console_ui;

pub use console::ConsoleState;
pub use console_ui::render;
