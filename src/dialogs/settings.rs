//! Settings dialog.
//!
//! Edits [`AppSettings`] in place; persistence happens through the normal
//! app save path. Strict mode changed here is pushed to the probe at the
//! top of the next frame.

use eframe::egui;

use crate::config::AppSettings;

pub fn show_settings_window(ctx: &egui::Context, open: &mut bool, settings: &mut AppSettings) {
    egui::Window::new("Settings")
        .open(open)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Strict mode");
                    ui.checkbox(&mut settings.strict_mode, "double-invoke on mount");
                    ui.end_row();

                    ui.label("Dark theme");
                    ui.checkbox(&mut settings.dark_mode, "");
                    ui.end_row();

                    ui.label("Console font size");
                    ui.add(egui::Slider::new(&mut settings.font_size, 9.0..=24.0).suffix(" pt"));
                    ui.end_row();

                    ui.label("Show legend");
                    ui.checkbox(&mut settings.show_legend, "");
                    ui.end_row();
                });

            ui.separator();
            if ui.button("Reset to defaults").clicked() {
                *settings = AppSettings::default();
            }
        });
    settings.clamp();
}
