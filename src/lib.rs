//! LIFESCOPE - component lifecycle visualizer library
//!
//! Re-exports all modules for use by binary targets.

// Core engine (log store, grouping, events, probe)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod dialogs;
pub mod help;
pub mod main_events;
pub mod widgets;

// Re-export commonly used types from core
pub use core::events::{downcast_event, ActionQueue, BoxedEvent, Event, EventQueue};
pub use core::grouping::{compute_groups, PhaseGroup, PhaseKind};
pub use core::log_store::{EntryKind, LogEntry, LogSink, LogStore, RenderMark, RenderOrigin};
pub use core::probe::Probe;
