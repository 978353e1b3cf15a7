//! Badge legend for the lifecycle console.

use eframe::egui::{self, RichText};

use crate::core::EntryKind;
use crate::widgets::console::console_ui::kind_color;

struct LegendRow {
    kind: EntryKind,
    desc: &'static str,
}

impl LegendRow {
    const fn new(kind: EntryKind, desc: &'static str) -> Self {
        Self { kind, desc }
    }
}

const LEGEND: &[LegendRow] = &[
    LegendRow::new(EntryKind::Render, "Render pass start / end"),
    LegendRow::new(EntryKind::State, "State initializer"),
    LegendRow::new(EntryKind::Memo, "Memoized value recompute"),
    LegendRow::new(EntryKind::Layout, "Layout effect, runs before paint"),
    LegendRow::new(EntryKind::Effect, "Effect, runs after paint"),
    LegendRow::new(EntryKind::Cleanup, "Effect teardown"),
];

pub fn render(ui: &mut egui::Ui) {
    ui.label(RichText::new("Legend").strong());
    egui::Grid::new("legend_grid")
        .num_columns(2)
        .spacing([8.0, 2.0])
        .show(ui, |ui| {
            for row in LEGEND {
                ui.label(
                    RichText::new(format!("[{}]", row.kind.label()))
                        .color(kind_color(row.kind))
                        .monospace(),
                );
                ui.label(RichText::new(row.desc).weak().small());
                ui.end_row();
            }
        });
}
