//! Probe - the instrumented sample component, simulated.
//!
//! The probe plays back the lifecycle of a small counter component:
//! render passes emit synchronously, commit-side work (layout effects,
//! effects, their cleanups) is scheduled a frame or two later and
//! drained by [`Probe::tick`] from the UI loop. In strict mode mounts
//! double-invoke the render pass and remount effects shortly after
//! commit, reproducing the development-mode artifacts the grouping fold
//! exists for. All emissions go through a [`LogSink`], so nothing
//! becomes visible mid-frame.

use std::time::{Duration, Instant};

use super::log_store::{EntryKind, LogSink, LogStore, RenderMark, RenderOrigin};

/// Spacing between the render pass and the scheduled commit batches.
const COMMIT_DELAY: Duration = Duration::from_millis(16);

/// One lifecycle event waiting to be appended to the log.
#[derive(Clone, Debug)]
pub struct Emission {
    pub kind: EntryKind,
    pub mark: Option<RenderMark>,
    pub message: String,
}

impl Emission {
    fn new(kind: EntryKind, mark: Option<RenderMark>, message: impl Into<String>) -> Self {
        Self { kind, mark, message: message.into() }
    }
}

fn layout_run() -> Emission {
    Emission::new(EntryKind::Layout, None, "Layout effect run")
}

fn layout_cleanup() -> Emission {
    Emission::new(EntryKind::Cleanup, None, "Layout effect cleanup")
}

fn effect_run() -> Emission {
    Emission::new(EntryKind::Effect, None, "Effect run")
}

fn effect_cleanup() -> Emission {
    Emission::new(EntryKind::Cleanup, None, "Effect cleanup")
}

/// Due-time batches of emissions. Polled with an explicit `now` so the
/// schedule is testable without sleeping.
#[derive(Default)]
pub struct PhaseScheduler {
    slots: Vec<(Instant, Vec<Emission>)>,
}

impl PhaseScheduler {
    pub fn schedule(&mut self, due: Instant, batch: Vec<Emission>) {
        self.slots.push((due, batch));
    }

    /// Pop every batch due at `now`, ordered by due time (ties keep
    /// insertion order).
    pub fn poll_due(&mut self, now: Instant) -> Vec<Emission> {
        let mut due: Vec<(Instant, Vec<Emission>)> = Vec::new();
        let mut rest: Vec<(Instant, Vec<Emission>)> = Vec::new();
        for slot in self.slots.drain(..) {
            if slot.0 <= now {
                due.push(slot);
            } else {
                rest.push(slot);
            }
        }
        self.slots = rest;
        due.sort_by_key(|slot| slot.0);
        due.into_iter().flat_map(|slot| slot.1).collect()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Earliest pending due time, for repaint scheduling.
    pub fn next_due(&self) -> Option<Instant> {
        self.slots.iter().map(|slot| slot.0).min()
    }
}

/// The sample component: a counter with one derived value, one layout
/// effect and one effect, all instrumented.
pub struct Probe {
    sink: LogSink,
    scheduler: PhaseScheduler,
    mounted: bool,
    strict_mode: bool,
    render_count: u32,
    count: i32,
    computed: i32,
}

impl Default for Probe {
    /// Probe wired to nowhere; emissions are discarded until a caller
    /// attaches one built from a live store sink.
    fn default() -> Self {
        Self::new(LogStore::new().sink())
    }
}

impl Probe {
    pub fn new(sink: LogSink) -> Self {
        Self {
            sink,
            scheduler: PhaseScheduler::default(),
            mounted: false,
            strict_mode: true,
            render_count: 0,
            count: 0,
            computed: 0,
        }
    }

    pub fn mounted(&self) -> bool {
        self.mounted
    }

    pub fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Applies from the next mount/update on.
    pub fn set_strict_mode(&mut self, on: bool) {
        self.strict_mode = on;
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn computed(&self) -> i32 {
        self.computed
    }

    pub fn render_count(&self) -> u32 {
        self.render_count
    }

    /// Mount the component: fresh state, render pass (twice in strict
    /// mode), then commit work spread over the next frames. The strict
    /// remount artifact lands well inside the fold window.
    pub fn mount(&mut self, now: Instant) {
        if self.mounted {
            log::debug!("mount ignored, probe already mounted");
            return;
        }
        self.mounted = true;
        self.render_count = 0;
        self.count = 0;
        self.computed = 0;

        let mut batch = self.render_pass(true);
        if self.strict_mode {
            batch.extend(self.render_pass(false));
        }
        self.emit(batch);

        self.scheduler.schedule(now + COMMIT_DELAY, vec![layout_run()]);
        self.scheduler.schedule(now + 2 * COMMIT_DELAY, vec![effect_run()]);
        if self.strict_mode {
            // Development-mode effect remount: tear both effects down
            // and run them again right after the first commit.
            self.scheduler.schedule(now + 3 * COMMIT_DELAY, vec![layout_cleanup(), effect_cleanup()]);
            self.scheduler.schedule(now + 4 * COMMIT_DELAY, vec![layout_run(), effect_run()]);
        }
        log::info!("probe mounted (strict={})", self.strict_mode);
    }

    /// Bump the counter: update render pass, then cleanup-and-rerun for
    /// both effects. Strict mode renders twice here too; those extra
    /// groups are expected, the fold applies to mounts only.
    pub fn increment(&mut self, now: Instant) {
        if !self.mounted {
            log::debug!("increment ignored, probe not mounted");
            return;
        }
        self.count += 1;
        self.computed = self.count * 2;

        let mut batch = self.render_pass(false);
        if self.strict_mode {
            batch.extend(self.render_pass(false));
        }
        self.emit(batch);

        self.scheduler.schedule(now + COMMIT_DELAY, vec![layout_cleanup(), layout_run()]);
        self.scheduler.schedule(now + 2 * COMMIT_DELAY, vec![effect_cleanup(), effect_run()]);
    }

    /// Tear the component down: cancel anything still scheduled, then
    /// run both cleanups.
    pub fn unmount(&mut self, _now: Instant) {
        if !self.mounted {
            log::debug!("unmount ignored, probe not mounted");
            return;
        }
        self.mounted = false;
        self.scheduler.clear();
        self.emit(vec![layout_cleanup(), effect_cleanup()]);
        log::info!("probe unmounted");
    }

    /// Drain scheduled batches that are due. Call once per frame.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.scheduler.poll_due(now);
        let n = due.len();
        self.emit(due);
        n
    }

    pub fn has_scheduled(&self) -> bool {
        !self.scheduler.is_empty()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    fn emit(&self, batch: Vec<Emission>) {
        for em in batch {
            self.sink.append(em.kind, em.mark, em.message);
        }
    }

    /// One render pass: start marker, optional state init, derived
    /// value, end marker. First pass after mount reads as Mount, every
    /// later pass as Update #n.
    fn render_pass(&mut self, init_state: bool) -> Vec<Emission> {
        self.render_count += 1;
        let (origin, label) = if self.render_count == 1 {
            (RenderOrigin::Mount, "Render start (Mount)".to_string())
        } else {
            (RenderOrigin::Update, format!("Render start (Update #{})", self.render_count - 1))
        };

        let mut batch = vec![Emission::new(EntryKind::Render, Some(RenderMark::Start(origin)), label)];
        if init_state {
            batch.push(Emission::new(
                EntryKind::State,
                None,
                format!("State initialized (count = {})", self.count),
            ));
        }
        batch.push(Emission::new(
            EntryKind::Memo,
            None,
            format!("Memo recomputed (computed = {})", self.computed),
        ));
        batch.push(Emission::new(EntryKind::Render, Some(RenderMark::End), "Render end"));
        batch
    }
}
