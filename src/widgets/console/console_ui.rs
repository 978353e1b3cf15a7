//! Lifecycle console rendering.
//!
//! Draws the grouped event log as collapsible phase sections with a
//! color-coded badge per entry kind. Pure presentation: reads the computed
//! groups, never the raw store, and reports user intent through the
//! returned [`ActionQueue`].

use eframe::egui::{self, Align, Color32, Layout, RichText, ScrollArea, Sense};

use crate::config::AppSettings;
use crate::core::{ActionQueue, EntryKind, LogEntry, PhaseGroup, PhaseKind};
use crate::main_events::ClearLogEvent;

use super::console::ConsoleState;

pub fn kind_color(kind: EntryKind) -> Color32 {
    match kind {
        EntryKind::Render => Color32::from_rgb(100, 180, 255),
        EntryKind::Layout => Color32::from_rgb(200, 140, 255),
        EntryKind::Effect => Color32::from_rgb(100, 255, 180),
        EntryKind::State => Color32::from_rgb(255, 180, 100),
        EntryKind::Memo => Color32::from_rgb(100, 220, 255),
        EntryKind::Cleanup => Color32::from_rgb(255, 100, 100),
    }
}

pub fn phase_color(kind: PhaseKind) -> Color32 {
    match kind {
        PhaseKind::Mount => Color32::from_rgb(100, 255, 180),
        PhaseKind::Update => Color32::from_rgb(100, 180, 255),
        PhaseKind::Unmount => Color32::from_rgb(255, 100, 100),
        PhaseKind::Other => Color32::GRAY,
    }
}

/// Wall-clock time for a group header, seconds precision.
fn fmt_group_time(timestamp_ms: u64) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(timestamp_ms as i64)
        .map(|utc| utc.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
}

/// Wall-clock time for an entry row, millisecond precision.
fn fmt_entry_time(timestamp_ms: u64) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(timestamp_ms as i64)
        .map(|utc| utc.with_timezone(&chrono::Local).format("%H:%M:%S%.3f").to_string())
}

/// 1-based display index of each group's first entry. Numbering runs
/// across groups so the rows read as one continuous log.
fn start_indices(groups: &[PhaseGroup]) -> Vec<usize> {
    let mut next = 1;
    groups
        .iter()
        .map(|group| {
            let start = next;
            next += group.entries.len();
            start
        })
        .collect()
}

pub fn render(
    ui: &mut egui::Ui,
    state: &mut ConsoleState,
    groups: &[PhaseGroup],
    settings: &AppSettings,
) -> ActionQueue {
    let mut actions = ActionQueue::new();

    ui.horizontal(|ui| {
        ui.heading("Lifecycle Console");
        let total: usize = groups.iter().map(|g| g.entries.len()).sum();
        ui.label(RichText::new(format!("{total} events")).weak());
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("Clear").clicked() {
                actions.send(ClearLogEvent);
            }
        });
    });
    ui.separator();

    state.sync_groups(groups);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if groups.is_empty() {
                ui.add_space(24.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Waiting for lifecycle events...").weak().italics());
                    ui.label(
                        RichText::new("Mount the probe and interact with it to see phases form.")
                            .weak()
                            .small(),
                    );
                });
                return;
            }
            let starts = start_indices(groups);
            for (group, start) in groups.iter().zip(starts) {
                group_section(ui, state, group, start, settings.font_size);
            }
        });

    actions
}

fn group_section(
    ui: &mut egui::Ui,
    state: &mut ConsoleState,
    group: &PhaseGroup,
    start_index: usize,
    font_size: f32,
) {
    let expanded = state.is_expanded(group.id);
    let header = ui.horizontal(|ui| {
        let arrow = if expanded { "▼" } else { "▶" };
        ui.label(RichText::new(arrow).weak());
        ui.label(RichText::new(group.title()).color(phase_color(group.kind)).strong());
        if let Some(time) = fmt_group_time(group.timestamp_ms) {
            ui.label(RichText::new(time).weak().monospace());
        }
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.label(RichText::new(format!("{} events", group.entries.len())).weak().small());
        });
    });
    let header_response = ui.interact(
        header.response.rect,
        ui.id().with(group.id),
        Sense::click(),
    );
    if header_response.clicked() {
        state.toggle(group.id);
    }

    if expanded {
        ui.indent(group.id, |ui| {
            for (offset, entry) in group.entries.iter().enumerate() {
                entry_row(ui, start_index + offset, entry, font_size);
            }
        });
        ui.add_space(4.0);
    }
}

fn entry_row(ui: &mut egui::Ui, index: usize, entry: &LogEntry, font_size: f32) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{index:02}"))
                .weak()
                .monospace()
                .size(font_size - 2.0),
        );
        ui.label(
            RichText::new(format!("[{:<7}]", entry.kind.label()))
                .color(kind_color(entry.kind))
                .monospace()
                .size(font_size),
        );
        if let Some(time) = fmt_entry_time(entry.timestamp_ms) {
            ui.label(RichText::new(time).weak().monospace().size(font_size - 2.0));
        }
        ui.label(RichText::new(&entry.message).size(font_size));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{compute_groups, RenderMark, RenderOrigin};
    use uuid::Uuid;

    fn entry(kind: EntryKind, mark: Option<RenderMark>, message: &str, ts: u64) -> LogEntry {
        LogEntry { id: Uuid::new_v4(), kind, mark, message: message.to_string(), timestamp_ms: ts }
    }

    #[test]
    fn display_numbering_runs_across_groups() {
        let log = vec![
            entry(EntryKind::Render, Some(RenderMark::Start(RenderOrigin::Mount)), "Render start (Mount)", 0),
            entry(EntryKind::State, None, "State initialized (count = 0)", 0),
            entry(EntryKind::Render, Some(RenderMark::End), "Render end", 0),
            entry(EntryKind::Render, Some(RenderMark::Start(RenderOrigin::Update)), "Render start (Update #1)", 300),
            entry(EntryKind::Render, Some(RenderMark::End), "Render end", 300),
        ];
        let groups = compute_groups(&log);
        assert_eq!(groups.len(), 2);

        // Rows display 01..03 in the first group, then continue 04..05
        assert_eq!(start_indices(&groups), [1, 4]);
    }

    #[test]
    fn no_groups_no_indices() {
        assert!(start_indices(&[]).is_empty());
    }
}
