//! Probe source viewer.
//!
//! Shows the simulation code driving the event stream, so the console can
//! be read next to the lifecycle it narrates.

use eframe::egui;
use egui_extras::syntax_highlighting::{self, CodeTheme};

const PROBE_SOURCE: &str = include_str!("../core/probe.rs");

pub fn show_code_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Probe Source")
        .open(open)
        .default_size([640.0, 480.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new("src/core/probe.rs").weak().monospace());
            ui.separator();
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let theme = CodeTheme::from_memory(ui.ctx(), ui.style());
                    syntax_highlighting::code_view_ui(ui, &theme, PROBE_SOURCE, "rs");
                });
        });
}
