use eframe::egui::{self, RichText, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::data::aggregate::{ChartBundle, CountEntry};
use crate::data::insight::format_count;
use crate::state::DashboardState;
use crate::theme;

/// How many states the distribution chart shows. The underlying summary is
/// untruncated; only this chart clips it.
const STATE_CHART_LIMIT: usize = 8;

// ---------------------------------------------------------------------------
// Grid layout
// ---------------------------------------------------------------------------

/// Render the full chart grid for the current bundle: trend and cities on
/// top, manufacturers / EV types / states below, CAFV eligibility last.
pub fn charts_grid(ui: &mut Ui, state: &DashboardState) {
    let charts = &state.charts;
    let dark = state.dark_mode;

    ui.columns(2, |cols: &mut [Ui]| {
        adoption_trend(&mut cols[0], charts, dark);
        top_cities(&mut cols[1], charts, dark);
    });
    ui.add_space(8.0);
    ui.columns(3, |cols: &mut [Ui]| {
        top_manufacturers(&mut cols[0], charts, dark);
        ev_types(&mut cols[1], charts, dark);
        state_distribution(&mut cols[2], charts, dark);
    });
    ui.add_space(8.0);
    cafv_eligibility(ui, charts, dark);
}

fn chart_card(ui: &mut Ui, title: &str, subtitle: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.group(|ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.strong(title);
        ui.label(RichText::new(subtitle).weak().small());
        ui.add_space(4.0);
        add_contents(ui);
    });
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

/// Registrations per model year as a line over the year categories.
fn adoption_trend(ui: &mut Ui, charts: &ChartBundle, dark: bool) {
    chart_card(ui, "EV Adoption Trends", "Year-over-year growth", |ui: &mut Ui| {
        let points: PlotPoints = charts
            .year_data
            .iter()
            .enumerate()
            .map(|(i, entry)| [i as f64, entry.count as f64])
            .collect();
        let labels: Vec<String> = charts.year_data.iter().map(|e| e.year.clone()).collect();
        let color = theme::accent(dark, 0);

        Plot::new("adoption_trend")
            .height(220.0)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .y_axis_formatter(|mark, _range| count_label(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(points)
                        .name("Registrations")
                        .color(color)
                        .width(3.0),
                );
            });
    });
}

/// Top-10 cities as horizontal bars, largest on top.
fn top_cities(ui: &mut Ui, charts: &ChartBundle, dark: bool) {
    chart_card(
        ui,
        "Top Cities by EV Count",
        "Leading metropolitan areas",
        |ui: &mut Ui| {
            let color = theme::accent(dark, 1);
            let bars = ranked_bars(&charts.top_cities, |_| color);
            let labels = bottom_up_names(&charts.top_cities);

            Plot::new("top_cities")
                .height(220.0)
                .allow_drag(false)
                .allow_scroll(false)
                .allow_zoom(false)
                .allow_boxed_zoom(false)
                .x_axis_formatter(|mark, _range| count_label(mark.value))
                .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars).horizontal());
                });
        },
    );
}

/// Top-8 makes as horizontal bars, one palette colour per make.
fn top_manufacturers(ui: &mut Ui, charts: &ChartBundle, dark: bool) {
    chart_card(ui, "Top Manufacturers", "Market share breakdown", |ui: &mut Ui| {
        let colors = theme::series_palette(dark, charts.make_data.len());
        let bars = ranked_bars(&charts.make_data, |i| colors[i]);
        let labels = bottom_up_names(&charts.make_data);

        Plot::new("top_manufacturers")
            .height(240.0)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .x_axis_formatter(|mark, _range| count_label(mark.value))
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    });
}

/// EV type share as labelled progress bars; usually just BEV vs PHEV.
fn ev_types(ui: &mut Ui, charts: &ChartBundle, dark: bool) {
    chart_card(ui, "EV Types", "Vehicle categorization", |ui: &mut Ui| {
        share_list(ui, &charts.ev_type_data, dark);
    });
}

/// Per-state vertical bars, clipped to the leading states.
fn state_distribution(ui: &mut Ui, charts: &ChartBundle, dark: bool) {
    chart_card(ui, "State Distribution", "Geographic coverage", |ui: &mut Ui| {
        let shown = &charts.state_data[..charts.state_data.len().min(STATE_CHART_LIMIT)];
        let color = theme::accent(dark, 2);
        let bars: Vec<Bar> = shown
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                Bar::new(i as f64, entry.value as f64)
                    .name(&entry.name)
                    .fill(color)
                    .width(0.6)
            })
            .collect();
        let labels: Vec<String> = shown.iter().map(|e| e.name.clone()).collect();

        Plot::new("state_distribution")
            .height(240.0)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .y_axis_formatter(|mark, _range| count_label(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    });
}

/// CAFV eligibility share; labels are long, so this card takes full width.
fn cafv_eligibility(ui: &mut Ui, charts: &ChartBundle, dark: bool) {
    chart_card(
        ui,
        "CAFV Eligibility",
        "Clean alternative fuel qualification",
        |ui: &mut Ui| {
            share_list(ui, &charts.cafv_data, dark);
        },
    );
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Horizontal bars for a ranked summary, positioned so the first (largest)
/// entry lands on top.
fn ranked_bars(entries: &[CountEntry], color: impl Fn(usize) -> egui::Color32) -> Vec<Bar> {
    let n = entries.len();
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Bar::new((n - 1 - i) as f64, entry.value as f64)
                .name(&entry.name)
                .fill(color(i))
                .width(0.6)
        })
        .collect()
}

/// Names in bottom-up axis order for a ranked horizontal chart.
fn bottom_up_names(entries: &[CountEntry]) -> Vec<String> {
    entries.iter().rev().map(|e| e.name.clone()).collect()
}

/// Axis label for a category position; blank between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if idx < 0.0 || (value - idx).abs() > 0.001 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Axis label for a count; blank for fractional grid marks.
fn count_label(value: f64) -> String {
    if value < 0.0 || value.fract().abs() > f64::EPSILON {
        return String::new();
    }
    format_count(value as u64)
}

/// Rows of name + share bar, one accent colour per row.
fn share_list(ui: &mut Ui, entries: &[CountEntry], dark: bool) {
    let total: u64 = entries.iter().map(|e| e.value).sum();
    if total == 0 {
        ui.weak("No data");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        let fraction = entry.value as f64 / total as f64;
        ui.label(RichText::new(&entry.name).small());
        ui.add(
            egui::ProgressBar::new(fraction as f32)
                .fill(theme::accent(dark, i))
                .text(
                    RichText::new(format!(
                        "{} ({:.1}%)",
                        format_count(entry.value),
                        fraction * 100.0
                    ))
                    .small(),
                ),
        );
        ui.add_space(2.0);
    }
}
