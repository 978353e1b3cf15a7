//! Core modules - event log, grouping engine, probe, event queue.
//!
//! Everything in here is UI-free and drives the console from plain data.

pub mod events;
pub mod grouping;
pub mod log_store;
pub mod probe;

// Re-exports for convenience
pub use events::{ActionQueue, BoxedEvent, EventQueue, downcast_event};
pub use grouping::{DOUBLE_INVOKE_WINDOW_MS, PhaseGroup, PhaseKind, compute_groups};
pub use log_store::{EntryKind, LogEntry, LogSink, LogStore, RenderMark, RenderOrigin};
pub use probe::Probe;
