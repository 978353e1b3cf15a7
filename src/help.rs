//! Keyboard shortcut reference, shown in the F1 window.

use eframe::egui;

/// Single help entry (key binding + description)
#[derive(Clone, Debug)]
pub struct HelpEntry {
    pub key: &'static str,
    pub desc: &'static str,
}

impl HelpEntry {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

/// Global hotkeys
pub const GLOBAL_HELP: &[HelpEntry] = &[
    HelpEntry::new("F1", "Toggle this help"),
    HelpEntry::new("F12", "Toggle settings"),
    HelpEntry::new("L", "Toggle phase legend"),
    HelpEntry::new("ESC", "Close open dialogs"),
    HelpEntry::new("Q", "Quit"),
];

/// Probe controls
pub const PROBE_HELP: &[HelpEntry] = &[
    HelpEntry::new("M", "Mount / unmount the probe"),
    HelpEntry::new("I", "Increment counter (update render)"),
    HelpEntry::new("S", "Toggle strict-mode double invocation"),
    HelpEntry::new("V", "View probe source"),
];

/// Console controls
pub const CONSOLE_HELP: &[HelpEntry] = &[
    HelpEntry::new("C", "Clear log"),
    HelpEntry::new("Click header", "Expand / collapse a phase group"),
    HelpEntry::new("Mouse Wheel", "Scroll log"),
];

pub fn all_help_sections() -> Vec<(&'static str, &'static [HelpEntry])> {
    vec![
        ("Global", GLOBAL_HELP),
        ("Probe", PROBE_HELP),
        ("Console", CONSOLE_HELP),
    ]
}

/// Help window listing every binding, grouped by section.
pub fn show_help_window(ctx: &egui::Context, open: &mut bool) {
    let key_color = egui::Color32::from_rgb(255, 200, 100);

    egui::Window::new("Keyboard Shortcuts")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            for (i, (title, entries)) in all_help_sections().into_iter().enumerate() {
                if i > 0 {
                    ui.add_space(8.0);
                }
                ui.label(egui::RichText::new(title).strong());
                ui.add_space(2.0);
                egui::Grid::new(("help_grid", title)).num_columns(2).spacing([24.0, 4.0]).show(
                    ui,
                    |ui| {
                        for entry in entries {
                            ui.label(egui::RichText::new(entry.key).monospace().color(key_color));
                            ui.label(entry.desc);
                            ui.end_row();
                        }
                    },
                );
            }
        });
}
