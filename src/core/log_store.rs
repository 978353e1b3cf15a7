//! Append-only lifecycle event log with deferred writes.
//!
//! Producers hold a cloneable [`LogSink`] and append from instrumented
//! lifecycle points; entries sit in a channel until the UI loop drains
//! them with [`LogStore::flush_pending`] at the top of the frame. Writes
//! therefore never land mid-frame, and ordering is arrival order.

use chrono::Utc;
use crossbeam_channel::{Receiver, Sender, unbounded};
use uuid::Uuid;

/// Closed vocabulary of lifecycle event kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Render,
    Layout,
    Effect,
    State,
    Memo,
    Cleanup,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Render => "RENDER",
            EntryKind::Layout => "LAYOUT",
            EntryKind::Effect => "EFFECT",
            EntryKind::State => "STATE",
            EntryKind::Memo => "MEMO",
            EntryKind::Cleanup => "CLEANUP",
        }
    }
}

/// What caused a render pass to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOrigin {
    Mount,
    Update,
}

/// Structured render classification, present on `Render` entries only.
/// Grouping reads this field; the message text is presentation only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMark {
    Start(RenderOrigin),
    End,
}

/// One immutable log entry. Timestamps are epoch milliseconds, clamped
/// monotonically non-decreasing at flush time; ties keep arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub id: Uuid,
    pub kind: EntryKind,
    pub mark: Option<RenderMark>,
    pub message: String,
    pub timestamp_ms: u64,
}

/// Entry waiting in the queue: id already assigned, timestamp not yet.
#[derive(Debug)]
struct Pending {
    id: Uuid,
    kind: EntryKind,
    mark: Option<RenderMark>,
    message: String,
}

/// Write-only handle into a [`LogStore`]. Cheap to clone, safe to hand
/// to any producer; appends cannot fail and never block.
#[derive(Clone)]
pub struct LogSink {
    tx: Sender<Pending>,
}

impl LogSink {
    /// Queue an entry and return its id. The entry becomes visible on
    /// the next `flush_pending`, never synchronously.
    pub fn append(&self, kind: EntryKind, mark: Option<RenderMark>, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        let pending = Pending { id, kind, mark, message: message.into() };
        if self.tx.send(pending).is_err() {
            // Store dropped; producer outlived it. Nothing to do.
            log::debug!("append({kind:?}) after log store drop, entry discarded");
        }
        id
    }
}

/// The visible log plus its inbound queue. Single-writer: only the UI
/// thread flushes, clears and reads.
pub struct LogStore {
    entries: Vec<LogEntry>,
    tx: Sender<Pending>,
    rx: Receiver<Pending>,
    last_ts: u64,
    revision: u64,
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LogStore {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { entries: Vec::new(), tx, rx, last_ts: 0, revision: 0 }
    }

    /// New write handle. Handles stay valid for the store's lifetime.
    pub fn sink(&self) -> LogSink {
        LogSink { tx: self.tx.clone() }
    }

    /// Drain the queue into the visible log, FIFO. Returns the number
    /// of entries made visible.
    pub fn flush_pending(&mut self) -> usize {
        let now = now_ms();
        let mut flushed = 0;
        for p in self.rx.try_iter() {
            self.last_ts = self.last_ts.max(now);
            self.entries.push(LogEntry {
                id: p.id,
                kind: p.kind,
                mark: p.mark,
                message: p.message,
                timestamp_ms: self.last_ts,
            });
            flushed += 1;
        }
        if flushed > 0 {
            self.revision = self.revision.wrapping_add(1);
            log::trace!("flushed {flushed} entries, log len {}", self.entries.len());
        }
        flushed
    }

    /// Reset the visible log. Entries still in the queue survive and
    /// appear on the next flush.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.revision = self.revision.wrapping_add(1);
        log::debug!("log cleared");
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True while queued entries await a flush.
    pub fn has_pending(&self) -> bool {
        !self.rx.is_empty()
    }

    /// Bumped on every visible change; cheap recompute guard for
    /// derived views.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
