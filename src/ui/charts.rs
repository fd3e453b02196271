use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{SeriesPalette, generate_palette};
use crate::config::DashboardConfig;
use crate::data::aggregate::{Bubble, CategoryCounts, CountryMean, YearSeries};
use crate::state::AppState;

/// Label shown for the group of records missing a key.
const UNSPECIFIED: &str = "(unspecified)";

fn display_label(label: &str) -> &str {
    if label.is_empty() { UNSPECIFIED } else { label }
}

/// Axis formatter naming integer ticks after `labels` and hiding the rest.
fn index_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels
            .get(idx as usize)
            .map(|l| display_label(l).to_string())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render all six charts in a two-column grid.
pub fn chart_grid(ui: &mut Ui, state: &AppState, config: &DashboardConfig) {
    if state.store.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.loading {
                ui.spinner();
            } else {
                ui.heading("No data  (File → Open… or Reload from URL)");
            }
        });
        return;
    }

    let charts = &state.charts;
    let width = config.chart_width(state.visible_indices.len());
    let height = config.chart_height;
    // One fixed colour per single-series chart.
    let accents = generate_palette(3, 350.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].heading("Intensity Line Chart");
                scrolled(&mut cols[0], "intensity_scroll", |ui| {
                    let series = &charts.intensity_by_year;
                    year_line(ui, "intensity", "Intensity", series, accents[0], width, height)
                });
                cols[1].heading("Relevance Bar Chart");
                scrolled(&mut cols[1], "relevance_scroll", |ui| {
                    let series = &charts.relevance_by_year;
                    year_bars(ui, "relevance", "Relevance", series, accents[1], width, height)
                });
            });
            ui.add_space(24.0);

            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].heading("Regions Chart");
                let regions = &charts.region_distribution;
                category_bars(&mut cols[0], "regions", regions, false, 0.0, height);
                cols[1].heading("Topics Frequency Bar Chart");
                let topics = &charts.topic_frequency;
                category_bars(&mut cols[1], "topics", topics, true, 120.0, height);
            });
            ui.add_space(24.0);

            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].heading("Sources Bubble Chart");
                scrolled(&mut cols[0], "sources_scroll", |ui| {
                    source_bubbles(ui, &charts.source_bubbles, width, height)
                });
                cols[1].heading("Country vs. Likelihood Line Chart");
                scrolled(&mut cols[1], "likelihood_scroll", |ui| {
                    let means = &charts.likelihood_by_country;
                    country_likelihood(ui, means, accents[2], width, height)
                });
            });
            ui.add_space(24.0);

            ui.separator();
            super::table::records_table(ui, state);
        });
}

/// Per-record charts get wider with the data; let them scroll sideways.
fn scrolled(ui: &mut Ui, id: &str, draw: impl FnOnce(&mut Ui)) {
    ScrollArea::horizontal().id_salt(id).show(ui, draw);
}

fn plot(id: &str, width: f32, height: f32) -> Plot {
    Plot::new(id)
        .legend(Legend::default().position(egui_plot::Corner::LeftTop))
        .width(width.max(200.0))
        .height(height)
        .allow_scroll(false)
        .allow_drag(true)
        .allow_zoom(true)
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn year_points(series: &YearSeries) -> PlotPoints {
    series
        .values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| [i as f64, v]))
        .collect()
}

fn year_line(
    ui: &mut Ui,
    id: &str,
    name: &str,
    series: &YearSeries,
    color: Color32,
    width: f32,
    height: f32,
) {
    plot(id, width, height)
        .x_axis_formatter(index_formatter(series.labels.clone()))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(year_points(series))
                    .name(name)
                    .color(color)
                    .fill(0.0)
                    .width(1.5),
            );
        });
}

fn year_bars(
    ui: &mut Ui,
    id: &str,
    name: &str,
    series: &YearSeries,
    color: Color32,
    width: f32,
    height: f32,
) {
    let bars: Vec<Bar> = series
        .values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| Bar::new(i as f64, v).width(0.8)))
        .collect();

    plot(id, width, height)
        .x_axis_formatter(index_formatter(series.labels.clone()))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(name).color(color));
        });
}

fn category_bars(
    ui: &mut Ui,
    id: &str,
    counts: &CategoryCounts,
    horizontal: bool,
    hue_offset: f32,
    height: f32,
) {
    let palette = SeriesPalette::new(counts.entries.iter().map(|(l, _)| l.as_str()), hue_offset);
    let labels: Vec<String> = counts.entries.iter().map(|(l, _)| l.clone()).collect();
    let bars: Vec<Bar> = counts
        .entries
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .name(display_label(label))
                .fill(palette.fill_for(label))
                .stroke(egui::Stroke::new(1.0, palette.color_for(label)))
                .width(0.8)
        })
        .collect();

    let mut chart = BarChart::new(bars).name("Records");
    let mut canvas = plot(id, ui.available_width(), height);
    if horizontal {
        chart = chart.horizontal();
        canvas = canvas.y_axis_formatter(index_formatter(labels));
    } else {
        canvas = canvas.x_axis_formatter(index_formatter(labels));
    }
    canvas.show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

fn source_bubbles(ui: &mut Ui, bubbles: &[Bubble], width: f32, height: f32) {
    let palette = SeriesPalette::new(bubbles.iter().map(|b| b.label.as_str()), 200.0);

    plot("sources", width, height).show(ui, |plot_ui| {
        for bubble in bubbles {
            let center: PlotPoints =
                std::iter::once([bubble.x as f64, bubble.count as f64]).collect();
            plot_ui.points(
                Points::new(center)
                    .name(display_label(&bubble.label))
                    .color(palette.fill_for(&bubble.label))
                    .filled(true)
                    .radius(bubble.radius as f32),
            );
        }
    });
}

fn country_likelihood(ui: &mut Ui, means: &[CountryMean], color: Color32, width: f32, height: f32) {
    let labels: Vec<String> = means.iter().map(|m| m.country.clone()).collect();
    let points: Vec<[f64; 2]> = means
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.mean.map(|v| [i as f64, v]))
        .collect();

    plot("likelihood", width, height)
        .x_axis_formatter(index_formatter(labels))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points.iter().copied().collect::<PlotPoints>())
                    .name("Likelihood")
                    .color(color)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(points.into_iter().collect::<PlotPoints>())
                    .color(color)
                    .radius(3.0),
            );
        });
}
