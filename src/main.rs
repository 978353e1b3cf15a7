use lifescope::cli::Args;
use lifescope::config::{self, AppSettings};
use lifescope::core::{compute_groups, EventQueue, LogStore, PhaseGroup, Probe};
use lifescope::dialogs;
use lifescope::help;
use lifescope::main_events::{
    self, ClearLogEvent, IncrementEvent, MountToggleEvent, QuitEvent, StrictModeToggleEvent,
    ToggleCodeEvent, ToggleHelpEvent, ToggleLegendEvent, ToggleSettingsEvent,
};
use lifescope::widgets;
use lifescope::widgets::console::ConsoleState;

use anyhow::Context as _;
use clap::Parser;
use eframe::egui;
use log::{debug, info, trace, warn, LevelFilter};
use std::time::Instant;

/// Main application state
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
struct LifescopeApp {
    #[serde(skip)]
    store: LogStore,
    #[serde(skip)]
    probe: Probe,
    #[serde(skip)]
    queue: EventQueue,
    #[serde(skip)]
    groups: Vec<PhaseGroup>,
    /// Store revision the cached grouping was computed from.
    #[serde(skip)]
    groups_rev: u64,
    #[serde(skip)]
    console: ConsoleState,
    settings: AppSettings,
    #[serde(skip)]
    show_code: bool,
    #[serde(skip)]
    show_settings: bool,
    #[serde(skip)]
    show_help: bool,
}

impl Default for LifescopeApp {
    fn default() -> Self {
        let store = LogStore::new();
        let probe = Probe::new(store.sink());
        Self {
            store,
            probe,
            queue: EventQueue::new(),
            groups: Vec::new(),
            groups_rev: 0,
            console: ConsoleState::new(),
            settings: AppSettings::default(),
            show_code: false,
            show_settings: false,
            show_help: false,
        }
    }
}

impl LifescopeApp {
    /// Drain the event queue and apply each event to app state.
    fn handle_events(&mut self, ctx: &egui::Context, now: Instant) {
        let mut quit = false;
        for event in self.queue.poll() {
            if let Some(result) = main_events::handle_app_event(
                &event,
                now,
                &mut self.probe,
                &mut self.store,
                &mut self.settings,
                &mut self.show_code,
                &mut self.show_settings,
                &mut self.show_help,
            ) {
                quit |= result.quit;
            }
        }
        if quit {
            info!("Quit requested, closing viewport");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        // Don't process hotkeys when text input is active (typing in fields)
        if ctx.wants_keyboard_input() {
            return;
        }
        let input = ctx.input(|i| i.clone());

        if input.key_pressed(egui::Key::M) {
            self.queue.emit(MountToggleEvent);
        }
        if input.key_pressed(egui::Key::I) {
            self.queue.emit(IncrementEvent);
        }
        if input.key_pressed(egui::Key::C) {
            self.queue.emit(ClearLogEvent);
        }
        if input.key_pressed(egui::Key::S) {
            self.queue.emit(StrictModeToggleEvent);
        }
        if input.key_pressed(egui::Key::V) {
            self.queue.emit(ToggleCodeEvent);
        }
        if input.key_pressed(egui::Key::L) {
            self.queue.emit(ToggleLegendEvent);
        }
        if input.key_pressed(egui::Key::F1) {
            self.queue.emit(ToggleHelpEvent);
        }
        if input.key_pressed(egui::Key::F12) {
            self.queue.emit(ToggleSettingsEvent);
        }

        // ESC closes dialogs front to back, Q quits
        if input.key_pressed(egui::Key::Escape) {
            if self.show_code {
                self.show_code = false;
            } else if self.show_settings {
                self.show_settings = false;
            } else if self.show_help {
                self.show_help = false;
            }
        }
        if input.key_pressed(egui::Key::Q) {
            self.queue.emit(QuitEvent);
        }
    }
}

impl eframe::App for LifescopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if self.settings.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Settings edits from the previous frame reach the probe before it
        // emits anything this frame
        self.probe.set_strict_mode(self.settings.strict_mode);

        // Appends queued since the previous frame become visible now
        self.store.flush_pending();

        self.handle_events(ctx, now);
        self.probe.tick(now);

        // Regroup only when the visible log actually changed
        if self.groups_rev != self.store.revision() {
            self.groups = compute_groups(self.store.entries());
            self.groups_rev = self.store.revision();
            trace!(
                "regrouped {} entries into {} groups",
                self.store.len(),
                self.groups.len()
            );
        }

        widgets::status::render(
            ctx,
            &self.store,
            &self.groups,
            &self.probe,
            &self.settings,
            |event| self.queue.emit_boxed(event),
        );

        egui::SidePanel::left("stage_panel")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                let actions = widgets::stage::render(ui, &self.probe);
                for event in actions.events {
                    self.queue.emit_boxed(event);
                }
                if self.settings.show_legend {
                    ui.add_space(8.0);
                    ui.separator();
                    widgets::legend::render(ui);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let actions =
                widgets::console::render(ui, &mut self.console, &self.groups, &self.settings);
            for event in actions.events {
                self.queue.emit_boxed(event);
            }
        });

        dialogs::code::show_code_window(ctx, &mut self.show_code);
        dialogs::settings::show_settings_window(ctx, &mut self.show_settings, &mut self.settings);
        help::show_help_window(ctx, &mut self.show_help);

        self.handle_keyboard_input(ctx);

        // Keep frames coming while appends are queued or commit work is due
        if self.store.has_pending() || !self.queue.is_empty() {
            ctx.request_repaint();
        } else if let Some(due) = self.probe.next_due() {
            ctx.request_repaint_after(due.saturating_duration_since(now));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(self) {
            Ok(json) => {
                storage.set_string(eframe::APP_KEY, json);
                debug!(
                    "App state saved: strict={} dark={} font={}",
                    self.settings.strict_mode, self.settings.dark_mode, self.settings.font_size
                );
            }
            Err(e) => warn!("Failed to serialize app state: {e}"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    if let Some(log_file) = &args.log_file {
        // File logging: keep our level, quiet the UI stack down to info
        let log_path = log_file.clone().unwrap_or_else(config::default_log_file);
        if let Some(dir) = log_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
        }
        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("creating log file {}", log_path.display()))?;
        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", LevelFilter::Info)
            .filter_module("eframe", LevelFilter::Info)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
        info!("Logging to file: {} (level {log_level})", log_path.display());
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(default_level),
        )
        .filter_module("egui", LevelFilter::Info)
        .filter_module("eframe", LevelFilter::Info)
        .format_timestamp_millis()
        .init();
    }

    info!("Lifescope v{} starting", env!("CARGO_PKG_VERSION"));
    debug!("Command-line args: {args:?}");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "Lifescope v{} • F1 for help",
                env!("CARGO_PKG_VERSION")
            ))
            .with_inner_size([1100.0, 720.0])
            .with_resizable(true),
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Lifescope",
        native_options,
        Box::new(move |cc| {
            let mut app: LifescopeApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted state found, creating default app");
                    LifescopeApp::default()
                });

            // Runtime fields come back as bare defaults; wire the probe to
            // the store it actually logs into
            app.probe = Probe::new(app.store.sink());

            // CLI flags beat persisted settings when given
            if let Some(strict) = args.strict {
                app.settings.strict_mode = strict != 0;
            }
            app.settings.clamp();
            app.probe.set_strict_mode(app.settings.strict_mode);

            if args.mounted.map(|m| m != 0).unwrap_or(true) {
                app.probe.mount(Instant::now());
            }

            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))?;

    info!("Lifescope exiting");
    Ok(())
}
