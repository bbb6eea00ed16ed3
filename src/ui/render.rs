use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::charts::spec::{ChartData, ChartSpec, DashboardView, FreedomExtremes, RankedCountry};
use crate::state::AppState;
use crate::theme::Palette;

// ---------------------------------------------------------------------------
// egui_plot rendering adapter
// ---------------------------------------------------------------------------
//
// One of possibly many ChartSpec consumers. The specs carry resolved data
// and plain RGB tokens, so everything here is a straight translation into
// egui_plot primitives. The choropleth is the exception: egui has no geo
// backend, so its spec renders as a color-scaled country table instead of a
// map.

const CHART_HEIGHT: f32 = 260.0;

/// Render the full dashboard (or the current error) in the central panel.
pub fn dashboard_panel(ui: &mut Ui, state: &AppState) {
    let palette = state.theme.palette();

    if let Some(msg) = &state.render_error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(
                RichText::new(msg)
                    .color(palette.negative.to_color32())
                    .heading(),
            );
        });
        return;
    }

    let Some(view) = &state.dashboard else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select a year to load a dataset.");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // Map and ranking side by side, like the original 4:2 split.
            ui.columns(2, |cols: &mut [Ui]| {
                render_chart(&mut cols[0], &view.choropleth);
                top_five_block(&mut cols[1], view, &palette);
            });
            ui.add_space(12.0);

            render_chart(ui, &view.gdp_scatter);
            ui.add_space(12.0);

            if let Some(extremes) = &view.freedom {
                freedom_block(ui, extremes, &palette);
                ui.add_space(12.0);
            }

            render_chart(ui, &view.histogram);
            ui.add_space(12.0);
            render_chart(ui, &view.line);
            ui.add_space(12.0);
            render_chart(ui, &view.bar);
        });
}

/// Render one chart spec.
pub fn render_chart(ui: &mut Ui, spec: &ChartSpec) {
    ui.heading(&spec.title);
    match &spec.data {
        ChartData::Choropleth { entries, .. } => choropleth_table(ui, spec, entries),
        ChartData::Scatter { points, .. } => scatter_plot(ui, spec, points),
        ChartData::Histogram { bins } => histogram_plot(ui, spec, bins),
        ChartData::Line { points } => line_plot(ui, spec, points),
        ChartData::Bar { bars } => bar_plot(ui, spec, bars),
    }
}

// ---------------------------------------------------------------------------
// Choropleth fallback – color-scaled country table
// ---------------------------------------------------------------------------

fn choropleth_table(
    ui: &mut Ui,
    spec: &ChartSpec,
    entries: &[crate::charts::spec::ChoroplethEntry],
) {
    ScrollArea::vertical()
        .id_salt(&spec.title)
        .max_height(CHART_HEIGHT)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("choropleth_grid")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui: &mut Ui| {
                    for entry in entries {
                        ui.label(RichText::new("■").color(entry.fill.to_color32()));
                        let response = ui.label(&entry.country);
                        response.on_hover_ui(|ui: &mut Ui| {
                            for (label, value) in &entry.tooltip {
                                ui.label(format!("{label}: {value}"));
                            }
                        });
                        ui.label(format!("{:.3}", entry.score));
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// egui_plot charts
// ---------------------------------------------------------------------------

fn scatter_plot(ui: &mut Ui, spec: &ChartSpec, points: &[crate::charts::spec::ScatterPoint]) {
    Plot::new("gdp_scatter")
        .height(CHART_HEIGHT)
        .x_axis_label(spec.x_label.clone().unwrap_or_default())
        .y_axis_label(spec.y_label.clone().unwrap_or_default())
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for pt in points {
                let marker = Points::new(PlotPoints::from(vec![[pt.x, pt.y]]))
                    .name(&pt.region)
                    .color(pt.color.to_color32())
                    // Point size carries the score channel.
                    .radius((pt.size as f32).max(1.0));
                plot_ui.points(marker);
            }
        });
}

fn histogram_plot(ui: &mut Ui, spec: &ChartSpec, bins: &[crate::charts::spec::HistogramBin]) {
    let accent = spec.style.accent.to_color32();
    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            let center = (bin.lower + bin.upper) / 2.0;
            Bar::new(center, bin.count as f64)
                .width((bin.upper - bin.lower).abs())
                .name(format!("{:.2} – {:.2}", bin.lower, bin.upper))
        })
        .collect();

    Plot::new("score_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label(spec.x_label.clone().unwrap_or_default())
        .y_axis_label(spec.y_label.clone().unwrap_or_default())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(accent));
        });
}

fn line_plot(ui: &mut Ui, spec: &ChartSpec, points: &[crate::charts::spec::CountryValue]) {
    let accent = spec.style.accent.to_color32();
    let series: PlotPoints = points
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.value])
        .collect();

    Plot::new("score_line")
        .height(CHART_HEIGHT)
        .x_axis_label(spec.x_label.clone().unwrap_or_default())
        .y_axis_label(spec.y_label.clone().unwrap_or_default())
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(series).color(accent).width(1.5));
        });
}

fn bar_plot(ui: &mut Ui, spec: &ChartSpec, bars: &[crate::charts::spec::CountryValue]) {
    let accent = spec.style.accent.to_color32();
    let chart_bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, b)| Bar::new(i as f64, b.value).width(0.6).name(&b.country))
        .collect();

    Plot::new("top_five_bar")
        .height(CHART_HEIGHT)
        .x_axis_label(spec.x_label.clone().unwrap_or_default())
        .y_axis_label(spec.y_label.clone().unwrap_or_default())
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart_bars).color(accent));
        });
}

// ---------------------------------------------------------------------------
// Summary blocks
// ---------------------------------------------------------------------------

fn top_five_block(ui: &mut Ui, view: &DashboardView, palette: &Palette) {
    ui.heading(format!("Happiest Countries in {}", view.year));
    for entry in &view.top_five {
        progress_row(ui, entry, palette);
    }
}

fn progress_row(ui: &mut Ui, entry: &RankedCountry, palette: &Palette) {
    let bar = egui::ProgressBar::new(entry.fill_fraction as f32)
        .fill(palette.accent.to_color32())
        .text(format!("{} – {}", entry.country, entry.score));
    ui.add(bar);
}

fn freedom_block(ui: &mut Ui, extremes: &FreedomExtremes, palette: &Palette) {
    ui.columns(2, |cols: &mut [Ui]| {
        extreme_frame(
            &mut cols[0],
            "Most Free Country",
            &extremes.most_free.country,
            extremes.most_free.freedom,
            palette.positive.to_color32(),
        );
        extreme_frame(
            &mut cols[1],
            "Least Free Country",
            &extremes.least_free.country,
            extremes.least_free.freedom,
            palette.negative.to_color32(),
        );
    });
    ui.label(format!(
        "Freedom score spread: {:.3}",
        extremes.difference
    ));
}

fn extreme_frame(ui: &mut Ui, heading: &str, country: &str, freedom: f64, fill: egui::Color32) {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(5))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui: &mut Ui| {
            ui.label(RichText::new(heading).strong().color(egui::Color32::WHITE));
            ui.label(
                RichText::new(format!("{country} with a Freedom score of {freedom}"))
                    .color(egui::Color32::WHITE),
            );
        });
}
