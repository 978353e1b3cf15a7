//! Bottom status bar: log counters, probe state, strict-mode toggle.
//!
//! The strict checkbox edits a local copy and dispatches an event; the
//! actual state flip happens in the main event handler so every path that
//! toggles strict mode goes through the same code.

use eframe::egui::{self, Align, Color32, Layout, RichText};

use crate::config::AppSettings;
use crate::core::{BoxedEvent, LogStore, PhaseGroup, Probe};
use crate::main_events::StrictModeToggleEvent;

pub fn render(
    ctx: &egui::Context,
    store: &LogStore,
    groups: &[PhaseGroup],
    probe: &Probe,
    settings: &AppSettings,
    mut dispatch: impl FnMut(BoxedEvent),
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{} entries", store.len())).monospace());
            ui.separator();
            ui.label(RichText::new(format!("{} groups", groups.len())).monospace());
            ui.separator();

            if probe.mounted() {
                ui.label(
                    RichText::new("MOUNTED")
                        .color(Color32::from_rgb(100, 255, 180))
                        .monospace(),
                );
            } else {
                ui.label(RichText::new("UNMOUNTED").color(Color32::GRAY).monospace());
            }
            ui.separator();

            let mut strict = settings.strict_mode;
            if ui.checkbox(&mut strict, "Strict").changed() {
                dispatch(Box::new(StrictModeToggleEvent));
            }

            if store.has_pending() {
                ui.separator();
                ui.label(RichText::new("flushing...").weak().monospace());
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .weak()
                        .monospace(),
                );
            });
        });
    });
}
