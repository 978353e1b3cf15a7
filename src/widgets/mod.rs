//! UI Widgets - modular, reusable UI components
//!
//! Each widget renders from shared state and reports user intent through
//! an ActionQueue or a dispatch callback, never by mutating app state.

pub mod console;
pub mod legend;
pub mod stage;
pub mod status;
