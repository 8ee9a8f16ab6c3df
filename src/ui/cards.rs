use chrono::Local;
use eframe::egui::{Align, Layout, RichText, Ui};

use crate::data::aggregate::CountEntry;
use crate::data::insight::{format_count, latest_model_year};
use crate::state::DashboardState;
use crate::theme;

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

/// Top row of four headline metrics for the visible records.
pub fn summary_cards(ui: &mut Ui, state: &DashboardState) {
    let dark = state.dark_mode;
    let metrics = [
        ("Total Vehicles", format_count(state.matching_count() as u64), 0),
        ("Unique States", state.charts.state_data.len().to_string(), 1),
        ("Top Manufacturers", state.charts.make_data.len().to_string(), 5),
        ("Cities Covered", state.charts.top_cities.len().to_string(), 2),
    ];

    ui.columns(metrics.len(), |cols: &mut [Ui]| {
        for (col, (title, value, accent_idx)) in cols.iter_mut().zip(metrics) {
            col.group(|ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.weak(title);
                ui.label(
                    RichText::new(value)
                        .strong()
                        .size(22.0)
                        .color(theme::accent(dark, accent_idx)),
                );
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Performance metrics row
// ---------------------------------------------------------------------------

/// Second row: penetration percentage plus coverage and diversity counts.
pub fn metrics_row(ui: &mut Ui, state: &DashboardState) {
    let dark = state.dark_mode;
    let penetration = format!(
        "{:.1}%",
        state.matching_count() as f64 / state.total_count().max(1) as f64 * 100.0
    );
    let metrics = [
        (
            "Market Penetration",
            penetration,
            "of total EV population analyzed",
            0,
        ),
        (
            "Data Coverage",
            state.charts.state_data.len().to_string(),
            "states with EV registrations",
            1,
        ),
        (
            "Brand Diversity",
            state.charts.make_data.len().to_string(),
            "unique manufacturers represented",
            5,
        ),
    ];

    ui.columns(metrics.len(), |cols: &mut [Ui]| {
        for (col, (title, value, description, accent_idx)) in cols.iter_mut().zip(metrics) {
            col.group(|ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.label(title);
                ui.label(
                    RichText::new(value)
                        .strong()
                        .size(20.0)
                        .color(theme::accent(dark, accent_idx)),
                );
                ui.label(RichText::new(description).weak().small());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Executive summary footer
// ---------------------------------------------------------------------------

/// Bottom card: four key-indicator entries derived from the visible
/// records, plus the analysis context line.
pub fn executive_summary(ui: &mut Ui, state: &DashboardState) {
    let charts = &state.charts;
    let latest_year = latest_model_year(state.visible_records())
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let first_name = |entries: &[CountEntry]| {
        entries
            .first()
            .map(|e| e.name.clone())
            .unwrap_or_else(|| "N/A".to_string())
    };

    ui.group(|ui: &mut Ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui: &mut Ui| {
            ui.strong("Executive Summary");
            ui.weak("Key performance indicators and market insights");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                ui.weak(format!(
                    "{} Records Analyzed",
                    format_count(state.matching_count() as u64)
                ));
            });
        });
        ui.separator();

        let indicators = [
            (
                "Latest Technology",
                latest_year,
                "Most recent model year in dataset",
            ),
            (
                "Popular Category",
                first_name(&charts.ev_type_data),
                "Most registered vehicle type",
            ),
            (
                "Leading Market",
                first_name(&charts.top_cities),
                "City with highest EV adoption",
            ),
            (
                "Regional Leader",
                first_name(&charts.state_data),
                "State with most registrations",
            ),
        ];
        ui.columns(indicators.len(), |cols: &mut [Ui]| {
            for (col, (title, value, description)) in cols.iter_mut().zip(indicators) {
                col.label(title);
                col.strong(value);
                col.label(RichText::new(description).weak().small());
            }
        });

        ui.separator();
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("●").color(theme::accent(state.dark_mode, 1)).small());
            ui.weak("Real-time analytics");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                ui.weak(format!("Last updated: {}", Local::now().format("%B %-d, %Y")));
            });
        });
    });
}
