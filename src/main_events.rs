//! Application event handling - extracted from main.rs for clarity.
//!
//! Widgets and the keyboard layer emit these through the shared
//! [`EventQueue`](crate::core::EventQueue); the main loop polls once per
//! frame and dispatches here. Handlers mutate app state directly and
//! use [`EventResult`] only for actions that must run after the frame.

use std::time::Instant;

use log::debug;

use crate::config::AppSettings;
use crate::core::events::{BoxedEvent, downcast_event};
use crate::core::log_store::LogStore;
use crate::core::probe::Probe;

/// Mount the probe if unmounted, unmount it otherwise.
#[derive(Clone, Debug)]
pub struct MountToggleEvent;

/// Bump the probe counter, triggering an update render.
#[derive(Clone, Debug)]
pub struct IncrementEvent;

/// Reset the visible log.
#[derive(Clone, Debug)]
pub struct ClearLogEvent;

/// Flip strict-mode double invocation. Applies from the next action.
#[derive(Clone, Debug)]
pub struct StrictModeToggleEvent;

#[derive(Clone, Debug)]
pub struct ToggleCodeEvent;

#[derive(Clone, Debug)]
pub struct ToggleSettingsEvent;

#[derive(Clone, Debug)]
pub struct ToggleHelpEvent;

#[derive(Clone, Debug)]
pub struct ToggleLegendEvent;

#[derive(Clone, Debug)]
pub struct QuitEvent;

/// Result of handling an app event - may contain deferred actions
#[derive(Default)]
pub struct EventResult {
    pub quit: bool,
}

/// Handle a single app event (called from main event loop).
/// Returns Some(result) if event was handled, None otherwise.
#[allow(clippy::too_many_arguments)]
pub fn handle_app_event(
    event: &BoxedEvent,
    now: Instant,
    probe: &mut Probe,
    store: &mut LogStore,
    settings: &mut AppSettings,
    show_code: &mut bool,
    show_settings: &mut bool,
    show_help: &mut bool,
) -> Option<EventResult> {
    let mut result = EventResult::default();

    // === Probe Control ===
    if downcast_event::<MountToggleEvent>(event).is_some() {
        if probe.mounted() {
            probe.unmount(now);
        } else {
            probe.mount(now);
        }
        return Some(result);
    }
    if downcast_event::<IncrementEvent>(event).is_some() {
        probe.increment(now);
        return Some(result);
    }
    if downcast_event::<ClearLogEvent>(event).is_some() {
        debug!("ClearLog: dropping {} entries", store.len());
        store.clear();
        return Some(result);
    }
    if downcast_event::<StrictModeToggleEvent>(event).is_some() {
        settings.strict_mode = !settings.strict_mode;
        probe.set_strict_mode(settings.strict_mode);
        debug!("strict mode -> {}", settings.strict_mode);
        return Some(result);
    }

    // === UI State ===
    if downcast_event::<ToggleCodeEvent>(event).is_some() {
        *show_code = !*show_code;
        return Some(result);
    }
    if downcast_event::<ToggleSettingsEvent>(event).is_some() {
        *show_settings = !*show_settings;
        return Some(result);
    }
    if downcast_event::<ToggleHelpEvent>(event).is_some() {
        *show_help = !*show_help;
        return Some(result);
    }
    if downcast_event::<ToggleLegendEvent>(event).is_some() {
        settings.show_legend = !settings.show_legend;
        return Some(result);
    }
    if downcast_event::<QuitEvent>(event).is_some() {
        result.quit = true;
        return Some(result);
    }

    // Event not handled
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::EventQueue;

    fn dispatch(
        queue: &EventQueue,
        probe: &mut Probe,
        store: &mut LogStore,
        settings: &mut AppSettings,
    ) -> bool {
        let now = Instant::now();
        let (mut code, mut prefs, mut help) = (false, false, false);
        let mut handled = true;
        for event in queue.poll() {
            handled &= handle_app_event(
                &event, now, probe, store, settings, &mut code, &mut prefs, &mut help,
            )
            .is_some();
        }
        handled
    }

    #[test]
    fn mount_toggle_flips_probe_state() {
        let mut store = LogStore::new();
        let mut probe = Probe::new(store.sink());
        let mut settings = AppSettings::default();
        let queue = EventQueue::new();

        queue.emit(MountToggleEvent);
        assert!(dispatch(&queue, &mut probe, &mut store, &mut settings));
        assert!(probe.mounted());

        queue.emit(MountToggleEvent);
        dispatch(&queue, &mut probe, &mut store, &mut settings);
        assert!(!probe.mounted());
    }

    #[test]
    fn clear_event_empties_visible_log() {
        let mut store = LogStore::new();
        let mut probe = Probe::new(store.sink());
        let mut settings = AppSettings::default();
        let queue = EventQueue::new();

        probe.mount(Instant::now());
        store.flush_pending();
        assert!(!store.is_empty());

        queue.emit(ClearLogEvent);
        dispatch(&queue, &mut probe, &mut store, &mut settings);
        assert!(store.is_empty());
    }

    #[test]
    fn strict_toggle_updates_settings_and_probe() {
        let mut store = LogStore::new();
        let mut probe = Probe::new(store.sink());
        let mut settings = AppSettings::default();
        let queue = EventQueue::new();
        assert!(settings.strict_mode);

        queue.emit(StrictModeToggleEvent);
        dispatch(&queue, &mut probe, &mut store, &mut settings);
        assert!(!settings.strict_mode);
        assert!(!probe.strict_mode());
    }

    #[test]
    fn unknown_event_is_not_handled() {
        #[derive(Clone, Debug)]
        struct StrayEvent;

        let mut store = LogStore::new();
        let mut probe = Probe::new(store.sink());
        let mut settings = AppSettings::default();
        let queue = EventQueue::new();

        queue.emit(StrayEvent);
        assert!(!dispatch(&queue, &mut probe, &mut store, &mut settings));
    }
}
