//! Probe stage: the live component under observation plus its controls.

use eframe::egui::{self, RichText};

use crate::core::{ActionQueue, Probe};
use crate::main_events::{ClearLogEvent, IncrementEvent, MountToggleEvent, ToggleCodeEvent};

pub fn render(ui: &mut egui::Ui, probe: &Probe) -> ActionQueue {
    let mut actions = ActionQueue::new();

    ui.heading("Probe Stage");
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let mount_label = if probe.mounted() { "Unmount" } else { "Mount" };
        if ui.button(mount_label).clicked() {
            actions.send(MountToggleEvent);
        }
        if ui
            .add_enabled(probe.mounted(), egui::Button::new("Increment"))
            .clicked()
        {
            actions.send(IncrementEvent);
        }
    });
    ui.horizontal(|ui| {
        if ui.button("Clear Log").clicked() {
            actions.send(ClearLogEvent);
        }
        if ui.button("View Code").clicked() {
            actions.send(ToggleCodeEvent);
        }
    });

    ui.add_space(8.0);

    if probe.mounted() {
        egui::Frame::new()
            .fill(ui.style().visuals.faint_bg_color)
            .inner_margin(8.0)
            .corner_radius(4.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Probe Component").strong());
                ui.separator();
                egui::Grid::new("probe_grid")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("renders");
                        ui.label(RichText::new(format!("{}", probe.render_count())).monospace());
                        ui.end_row();
                        ui.label("count");
                        ui.label(RichText::new(format!("{}", probe.count())).monospace());
                        ui.end_row();
                        ui.label("computed");
                        ui.label(RichText::new(format!("{}", probe.computed())).monospace());
                        ui.end_row();
                    });
            });
    } else {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.label(RichText::new("Component unmounted").weak().italics());
            ui.add_space(12.0);
        });
    }

    ui.add_space(6.0);
    ui.label(RichText::new("Keys: M mount, I increment").weak().small());

    actions
}
