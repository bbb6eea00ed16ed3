use serde::Serialize;

use crate::data::model::YearLabel;
use crate::theme::{ColorScale, Palette, Rgb};

// ---------------------------------------------------------------------------
// ChartSpec – a declarative chart description
// ---------------------------------------------------------------------------

/// One chart, fully resolved: kind-specific data series plus style tokens.
/// Contains no renderer types; any backend that can draw points, bars, and
/// lines can consume it. Serializable so two builds from identical inputs
/// can be compared byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub style: ChartStyle,
    pub data: ChartData,
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self.data {
            ChartData::Choropleth { .. } => ChartKind::Choropleth,
            ChartData::Scatter { .. } => ChartKind::Scatter,
            ChartData::Histogram { .. } => ChartKind::Histogram,
            ChartData::Line { .. } => ChartKind::Line,
            ChartData::Bar { .. } => ChartKind::Bar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Choropleth,
    Scatter,
    Histogram,
    Line,
    Bar,
}

/// Style tokens resolved from the active theme's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartStyle {
    pub background: Rgb,
    pub panel: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
}

impl From<Palette> for ChartStyle {
    fn from(p: Palette) -> Self {
        Self {
            background: p.background,
            panel: p.panel,
            text: p.text,
            accent: p.accent,
        }
    }
}

// ---------------------------------------------------------------------------
// Chart data series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartData {
    /// World map colored by score. Location keys are country names; names a
    /// renderer's gazetteer does not recognize stay unfilled (accepted,
    /// silent degradation).
    Choropleth {
        entries: Vec<ChoroplethEntry>,
        scale: ColorScale,
        score_min: f64,
        score_max: f64,
    },
    Scatter {
        points: Vec<ScatterPoint>,
        legend: Vec<LegendEntry>,
    },
    Histogram {
        bins: Vec<HistogramBin>,
    },
    Line {
        points: Vec<CountryValue>,
    },
    Bar {
        bars: Vec<CountryValue>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethEntry {
    pub country: String,
    pub score: f64,
    /// Score sampled on the continuous scale.
    pub fill: Rgb,
    /// Tooltip rows, label → formatted value, in display order.
    pub tooltip: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub country: String,
    pub region: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryValue {
    pub country: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Summary blocks
// ---------------------------------------------------------------------------

/// One entry of the top-5 ranking with its progress-indicator fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCountry {
    pub country: String,
    pub score: f64,
    /// score / 10, clamped to [0, 1].
    pub fill_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreedomEntry {
    pub country: String,
    pub freedom: f64,
}

/// Most-free / least-free countries and their score difference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreedomExtremes {
    pub most_free: FreedomEntry,
    pub least_free: FreedomEntry,
    pub difference: f64,
}

// ---------------------------------------------------------------------------
// DashboardView – everything one render cycle displays
// ---------------------------------------------------------------------------

/// The complete output of one builder pass for a (year, theme) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub year: YearLabel,
    pub choropleth: ChartSpec,
    pub top_five: Vec<RankedCountry>,
    pub gdp_scatter: ChartSpec,
    /// Only present when the snapshot carries a Freedom column.
    pub freedom: Option<FreedomExtremes>,
    pub histogram: ChartSpec,
    pub line: ChartSpec,
    pub bar: ChartSpec,
}
