use eframe::egui::{self, Align, Color32, Layout, RichText, ScrollArea, Ui};

use crate::data::export;
use crate::data::insight::Trend;
use crate::data::loader::{self, LoadHandle};
use crate::data::model::FilterKey;
use crate::state::DashboardState;
use crate::theme;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState, pending_load: &mut Option<LoadHandle>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state, pending_load);
                ui.close_menu();
            }
            if ui.button("Export Filtered…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} matching",
                ds.len(),
                state.matching_count()
            ));
            ui.separator();
        }

        if ui
            .selectable_label(state.show_filters, "Filters")
            .clicked()
        {
            state.show_filters = !state.show_filters;
        }

        let theme_label = if state.dark_mode { "☀ Light" } else { "🌙 Dark" };
        if ui.button(theme_label).clicked() {
            state.dark_mode = !state.dark_mode;
        }

        if state.loading {
            ui.spinner();
            ui.label("Loading EV Data…");
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Insights banner
// ---------------------------------------------------------------------------

/// One-line rotating banner under the top bar: the active insight plus one
/// pagination dot per insight for jumping directly.
pub fn insights_banner(ui: &mut Ui, state: &mut DashboardState) {
    let Some(insight) = state.insights.get(state.active_insight).cloned() else {
        return;
    };
    let accent = theme::accent(state.dark_mode, state.active_insight);

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("⚡").color(accent).size(16.0));
        ui.strong(&insight.headline);
        ui.weak(&insight.detail);
        if insight.trend == Trend::Up {
            ui.label(RichText::new("↗").color(accent));
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            // Reversed so the dots read left-to-right in insight order.
            for idx in (0..state.insights.len()).rev() {
                let active = idx == state.active_insight;
                if ui.selectable_label(active, "•").clicked() {
                    state.active_insight = idx;
                }
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: free-text search plus one dropdown per
/// selectable field.
pub fn filter_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Filters");
        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            if ui
                .small_button(RichText::new("Clear All").color(Color32::RED))
                .clicked()
            {
                state.clear_filters();
            }
        });
    });
    let active = state.criteria.active_count();
    if active > 0 {
        ui.weak(format!("{active} active"));
    }
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the option lists so we can mutate state inside the loop.
    let options = dataset.options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Search");
            let mut search = state.criteria.search.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut search)
                    .hint_text("Search…")
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                state.update_filter(FilterKey::Search, search);
            }
            ui.separator();

            for key in FilterKey::SELECTABLE {
                let label = key.label();
                let current = state.criteria.get(key).to_string();
                let selected_text = if current.is_empty() {
                    format!("{label} (All)")
                } else {
                    current.clone()
                };

                ui.strong(label);
                egui::ComboBox::from_id_salt(key.as_str())
                    .width(ui.available_width())
                    .selected_text(selected_text)
                    .show_ui(ui, |ui: &mut Ui| {
                        if ui
                            .selectable_label(current.is_empty(), format!("{label} (All)"))
                            .clicked()
                        {
                            state.update_filter(key, String::new());
                        }
                        for value in options.for_key(key) {
                            if ui.selectable_label(current == *value, value).clicked() {
                                state.update_filter(key, value.clone());
                            }
                        }
                    });
                ui.add_space(6.0);
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState, pending_load: &mut Option<LoadHandle>) {
    let file = rfd::FileDialog::new()
        .set_title("Open EV registration data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Loading {}", path.display());
        state.loading = true;
        state.status_message = None;
        *pending_load = Some(loader::spawn_load(path));
    }
}

pub fn export_dialog(state: &mut DashboardState) {
    if state.dataset.is_none() {
        state.status_message = Some("Nothing to export: no dataset loaded".to_string());
        return;
    }

    let file = rfd::FileDialog::new()
        .set_title("Export filtered records")
        .set_file_name(export::default_export_name())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export::export_to_path(&path, state.visible_records()) {
            Ok(()) => {
                log::info!(
                    "Exported {} records to {}",
                    state.matching_count(),
                    path.display()
                );
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
