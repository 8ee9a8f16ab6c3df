use std::path::PathBuf;
use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use eframe::egui::{self, ScrollArea};

use crate::data::insight;
use crate::data::loader::{self, LoadHandle};
use crate::state::DashboardState;
use crate::theme::{self, DashboardPrefs};
use crate::ui::{cards, charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EvDashboardApp {
    pub state: DashboardState,
    /// In-flight background load, if any.
    pending_load: Option<LoadHandle>,
    /// When the insight banner last advanced.
    last_rotation: Instant,
}

impl EvDashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let prefs: DashboardPrefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let mut app = Self {
            state: DashboardState::default(),
            pending_load: None,
            last_rotation: Instant::now(),
        };
        app.state.dark_mode = prefs.dark_mode;

        if let Some(path) = startup_file() {
            log::info!("Loading {}", path.display());
            app.state.loading = true;
            app.pending_load = Some(loader::spawn_load(path));
        }
        app
    }

    /// Apply the result of a finished background load, if one arrived.
    fn poll_pending_load(&mut self) {
        let received = match &self.pending_load {
            Some(rx) => rx.try_recv(),
            None => return,
        };
        match received {
            Ok(Ok(dataset)) => {
                log::info!("Loaded {} records", dataset.len());
                self.state.set_dataset(dataset);
                self.pending_load = None;
            }
            Ok(Err(e)) => {
                log::error!("Failed to load file: {e:#}");
                self.state.status_message = Some(format!("Error: {e:#}"));
                self.state.loading = false;
                self.pending_load = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("Loader thread exited without a result");
                self.state.status_message = Some("Error: file loading failed".to_string());
                self.state.loading = false;
                self.pending_load = None;
            }
        }
    }

    /// Advance the insight banner on its dwell interval and schedule the
    /// repaint that will trigger the next advance.
    fn rotate_insights(&mut self, ctx: &egui::Context) {
        if self.state.insights.len() < 2 {
            return;
        }
        if self.last_rotation.elapsed() >= insight::ROTATE_INTERVAL {
            self.state.advance_insight();
            self.last_rotation = Instant::now();
        }
        let remaining = insight::ROTATE_INTERVAL.saturating_sub(self.last_rotation.elapsed());
        ctx.request_repaint_after(remaining);
    }
}

/// File to load on startup: the first CLI argument, or the standard dataset
/// name when it sits in the working directory.
fn startup_file() -> Option<PathBuf> {
    if let Some(arg) = std::env::args().nth(1) {
        return Some(PathBuf::from(arg));
    }
    let fallback = PathBuf::from("Electric_Vehicle_Population_Data.csv");
    fallback.exists().then_some(fallback)
}

impl eframe::App for EvDashboardApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let prefs = DashboardPrefs {
            dark_mode: self.state.dark_mode,
        };
        eframe::set_value(storage, eframe::APP_KEY, &prefs);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending_load();
        if self.pending_load.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
        theme::apply(ctx, self.state.dark_mode);
        self.rotate_insights(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &mut self.pending_load);
        });

        // ---- Rotating insights banner ----
        if !self.state.insights.is_empty() {
            egui::TopBottomPanel::top("insights_banner").show(ctx, |ui| {
                panels::insights_banner(ui, &mut self.state);
            });
        }

        // ---- Left side panel: filters ----
        if self.state.show_filters {
            egui::SidePanel::left("filter_panel")
                .default_width(260.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::filter_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: cards, charts, executive summary ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    if self.state.loading {
                        ui.spinner();
                    } else {
                        ui.heading("Open a file to view EV analytics  (File → Open…)");
                    }
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("EV Analytics Dashboard");
                    ui.weak("Comprehensive Electric Vehicle Data Analysis");
                    ui.add_space(8.0);

                    cards::summary_cards(ui, &self.state);
                    ui.add_space(8.0);
                    cards::metrics_row(ui, &self.state);
                    ui.add_space(12.0);
                    charts::charts_grid(ui, &self.state);
                    ui.add_space(12.0);
                    cards::executive_summary(ui, &self.state);
                });
        });
    }
}
