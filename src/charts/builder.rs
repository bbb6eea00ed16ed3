use crate::data::model::{CountryRecord, Snapshot};
use crate::error::{DashboardError, Result};
use crate::theme::{ColorScale, RegionColors, Theme};

use super::spec::{
    ChartData, ChartSpec, ChartStyle, ChoroplethEntry, CountryValue, DashboardView,
    FreedomEntry, FreedomExtremes, HistogramBin, LegendEntry, RankedCountry, ScatterPoint,
};

/// Number of equal-width bins in the score histogram.
const HISTOGRAM_BINS: usize = 20;

/// Ranking length for the "happiest countries" blocks.
const TOP_N: usize = 5;

// ---------------------------------------------------------------------------
// Dashboard build – one pure pass per (year, theme)
// ---------------------------------------------------------------------------

/// Derive every chart and summary from a validated snapshot. Stateless and
/// idempotent: identical inputs produce identical output, observable as
/// byte-identical JSON.
///
/// Fails with [`DashboardError::EmptySnapshot`] when there are no rows,
/// since every aggregate below needs at least one.
pub fn build_dashboard(snapshot: &Snapshot, theme: Theme) -> Result<DashboardView> {
    if snapshot.is_empty() {
        return Err(DashboardError::EmptySnapshot);
    }

    let style = ChartStyle::from(theme.palette());
    let year = snapshot.year;
    let ranking = top_five(&snapshot.records);

    Ok(DashboardView {
        year,
        choropleth: ChartSpec {
            title: format!("World Happiness Heatmap for {year}"),
            x_label: None,
            y_label: None,
            style,
            data: choropleth_data(&snapshot.records),
        },
        gdp_scatter: ChartSpec {
            title: format!("GDP per capita vs Happiness Score ({year})"),
            x_label: Some("GDP per capita".into()),
            y_label: Some("Happiness Score".into()),
            style,
            data: scatter_data(&snapshot.records),
        },
        freedom: freedom_extremes(snapshot)?,
        histogram: ChartSpec {
            title: "Happiness Score Distribution".into(),
            x_label: Some("Happiness Score".into()),
            y_label: Some("Frequency".into()),
            style,
            data: ChartData::Histogram {
                bins: histogram_bins(&snapshot.records),
            },
        },
        line: ChartSpec {
            title: format!("Happiness Scores for {year}"),
            x_label: Some("Country".into()),
            y_label: Some("Happiness Score".into()),
            style,
            data: ChartData::Line {
                points: country_scores(&snapshot.records),
            },
        },
        bar: ChartSpec {
            title: format!("Top 5 Happiest Countries in {year}"),
            x_label: Some("Country".into()),
            y_label: Some("Happiness Score".into()),
            style,
            // The bar chart repeats the top-5 selection.
            data: ChartData::Bar {
                bars: ranking
                    .iter()
                    .map(|r| CountryValue {
                        country: r.country.clone(),
                        value: r.score,
                    })
                    .collect(),
            },
        },
        top_five: ranking,
    })
}

// ---------------------------------------------------------------------------
// Choropleth
// ---------------------------------------------------------------------------

fn choropleth_data(records: &[CountryRecord]) -> ChartData {
    let (score_min, score_max) = score_range(records);
    let span = score_max - score_min;

    let entries = records
        .iter()
        .map(|rec| {
            let t = if span > 0.0 {
                (rec.happiness_score - score_min) / span
            } else {
                0.5
            };
            ChoroplethEntry {
                country: rec.country.clone(),
                score: rec.happiness_score,
                fill: ColorScale::Plasma.sample(t),
                tooltip: tooltip_rows(rec),
            }
        })
        .collect();

    ChartData::Choropleth {
        entries,
        scale: ColorScale::Plasma,
        score_min,
        score_max,
    }
}

fn tooltip_rows(rec: &CountryRecord) -> Vec<(String, String)> {
    vec![
        ("Region".into(), rec.region.clone()),
        ("Happiness Rank".into(), rec.happiness_rank.to_string()),
        ("Happiness Score".into(), format!("{}", rec.happiness_score)),
        ("GDP per capita".into(), format!("{}", rec.gdp_per_capita)),
        ("Social support".into(), format!("{}", rec.social_support)),
        (
            "Healthy life expectancy".into(),
            format!("{}", rec.healthy_life_expectancy),
        ),
        ("Generosity".into(), format!("{}", rec.generosity)),
        ("Dystopia Residual".into(), format!("{}", rec.dystopia_residual)),
    ]
}

// ---------------------------------------------------------------------------
// Top-5 ranking
// ---------------------------------------------------------------------------

/// The five records with the largest score. `sort_by` is stable, so ties
/// keep their input order.
pub fn top_five(records: &[CountryRecord]) -> Vec<RankedCountry> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    indices.sort_by(|&a, &b| {
        records[b]
            .happiness_score
            .total_cmp(&records[a].happiness_score)
    });
    indices
        .into_iter()
        .take(TOP_N)
        .map(|i| {
            let rec = &records[i];
            RankedCountry {
                country: rec.country.clone(),
                score: rec.happiness_score,
                fill_fraction: (rec.happiness_score / 10.0).clamp(0.0, 1.0),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// GDP scatter
// ---------------------------------------------------------------------------

fn scatter_data(records: &[CountryRecord]) -> ChartData {
    let region_colors = RegionColors::new(records.iter().map(|r| r.region.as_str()));

    let points = records
        .iter()
        .map(|rec| ScatterPoint {
            country: rec.country.clone(),
            region: rec.region.clone(),
            x: rec.gdp_per_capita,
            y: rec.happiness_score,
            size: rec.happiness_score,
            color: region_colors.color_for(&rec.region),
        })
        .collect();

    let legend = region_colors
        .legend_entries()
        .map(|(label, color)| LegendEntry {
            label: label.to_string(),
            color,
        })
        .collect();

    ChartData::Scatter { points, legend }
}

// ---------------------------------------------------------------------------
// Freedom extremes
// ---------------------------------------------------------------------------

/// Most-free and least-free countries, or `None` when the snapshot carries
/// no Freedom column. Ties resolve to the first record in input order.
pub fn freedom_extremes(snapshot: &Snapshot) -> Result<Option<FreedomExtremes>> {
    if !snapshot.has_freedom {
        return Ok(None);
    }
    if snapshot.is_empty() {
        return Err(DashboardError::EmptySnapshot);
    }

    let mut most: Option<(&CountryRecord, f64)> = None;
    let mut least: Option<(&CountryRecord, f64)> = None;
    for rec in &snapshot.records {
        let Some(freedom) = rec.freedom else {
            continue;
        };
        // Strict comparisons keep the first record on ties.
        match most {
            Some((_, best)) if freedom <= best => {}
            _ => most = Some((rec, freedom)),
        }
        match least {
            Some((_, worst)) if freedom >= worst => {}
            _ => least = Some((rec, freedom)),
        }
    }

    // A Freedom column where every cell is blank leaves nothing to compare.
    let (Some((most, most_v)), Some((least, least_v))) = (most, least) else {
        return Ok(None);
    };
    Ok(Some(FreedomExtremes {
        most_free: FreedomEntry {
            country: most.country.clone(),
            freedom: most_v,
        },
        least_free: FreedomEntry {
            country: least.country.clone(),
            freedom: least_v,
        },
        difference: most_v - least_v,
    }))
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Scores in `HISTOGRAM_BINS` equal-width bins over the observed min/max.
/// Values on an interior boundary belong to the higher bin; the maximum
/// lands in the last bin. A degenerate range (all scores equal) puts every
/// value in bin 0.
fn histogram_bins(records: &[CountryRecord]) -> Vec<HistogramBin> {
    let (min, max) = score_range(records);
    let width = (max - min) / HISTOGRAM_BINS as f64;

    let mut counts = [0usize; HISTOGRAM_BINS];
    for rec in records {
        let idx = if width > 0.0 {
            (((rec.happiness_score - min) / width) as usize).min(HISTOGRAM_BINS - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Line / shared helpers
// ---------------------------------------------------------------------------

fn country_scores(records: &[CountryRecord]) -> Vec<CountryValue> {
    records
        .iter()
        .map(|rec| CountryValue {
            country: rec.country.clone(),
            value: rec.happiness_score,
        })
        .collect()
}

fn score_range(records: &[CountryRecord]) -> (f64, f64) {
    let min = records
        .iter()
        .map(|r| r.happiness_score)
        .fold(f64::INFINITY, f64::min);
    let max = records
        .iter()
        .map(|r| r.happiness_score)
        .fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{YearLabel, REQUIRED_COLUMNS};

    fn record(country: &str, score: f64) -> CountryRecord {
        CountryRecord {
            country: country.to_string(),
            region: "Western Europe".into(),
            happiness_rank: 1,
            happiness_score: score,
            gdp_per_capita: 1.0,
            social_support: 1.0,
            healthy_life_expectancy: 0.8,
            generosity: 0.3,
            dystopia_residual: 2.0,
            freedom: None,
        }
    }

    fn snapshot(records: Vec<CountryRecord>, has_freedom: bool) -> Snapshot {
        Snapshot {
            year: YearLabel(2017),
            records,
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            has_freedom,
        }
    }

    #[test]
    fn top_five_breaks_ties_by_input_order() {
        let records = vec![
            record("A", 9.1),
            record("B", 9.1),
            record("C", 8.0),
            record("D", 7.0),
            record("E", 6.0),
            record("F", 5.0),
        ];
        let ranking = top_five(&records);
        let names: Vec<&str> = ranking.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn top_five_fill_fraction_is_clamped() {
        let records = vec![record("A", 11.2), record("B", -0.5)];
        let ranking = top_five(&records);
        assert_eq!(ranking[0].fill_fraction, 1.0);
        assert_eq!(ranking[1].fill_fraction, 0.0);
    }

    #[test]
    fn freedom_extremes_picks_argmax_and_argmin() {
        let mut records = vec![record("X", 7.0), record("Y", 6.0), record("Z", 5.0)];
        records[0].freedom = Some(0.9);
        records[1].freedom = Some(0.1);
        records[2].freedom = Some(0.5);
        let snap = snapshot(records, true);

        let ext = freedom_extremes(&snap).unwrap().unwrap();
        assert_eq!(ext.most_free.country, "X");
        assert_eq!(ext.least_free.country, "Y");
        assert!((ext.difference - 0.8).abs() < 1e-12);
    }

    #[test]
    fn freedom_extremes_ties_go_to_first_record() {
        let mut records = vec![record("P", 7.0), record("Q", 6.0)];
        records[0].freedom = Some(0.4);
        records[1].freedom = Some(0.4);
        let ext = freedom_extremes(&snapshot(records, true)).unwrap().unwrap();
        assert_eq!(ext.most_free.country, "P");
        assert_eq!(ext.least_free.country, "P");
        assert_eq!(ext.difference, 0.0);
    }

    #[test]
    fn freedom_extremes_absent_without_column() {
        let snap = snapshot(vec![record("A", 7.0)], false);
        assert_eq!(freedom_extremes(&snap).unwrap(), None);
    }

    #[test]
    fn freedom_extremes_on_empty_snapshot_fails() {
        let snap = snapshot(Vec::new(), true);
        assert!(matches!(
            freedom_extremes(&snap),
            Err(DashboardError::EmptySnapshot)
        ));
    }

    #[test]
    fn histogram_spans_observed_range_with_edges_assigned() {
        let records = vec![record("low", 0.0), record("high", 10.0)];
        let bins = histogram_bins(&records);
        assert_eq!(bins.len(), 20);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[19].upper, 10.0);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[19].count, 1);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn histogram_degenerate_range_uses_one_bin() {
        let records = vec![record("a", 5.0), record("b", 5.0), record("c", 5.0)];
        let bins = histogram_bins(&records);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn empty_snapshot_blocks_the_whole_build() {
        let snap = snapshot(Vec::new(), false);
        assert!(matches!(
            build_dashboard(&snap, Theme::Dark),
            Err(DashboardError::EmptySnapshot)
        ));
    }

    #[test]
    fn build_is_deterministic() {
        let mut records = vec![record("A", 7.2), record("B", 6.1), record("C", 5.4)];
        records[1].freedom = Some(0.3);
        let snap = snapshot(records, true);

        let first = build_dashboard(&snap, Theme::Dark).unwrap();
        let second = build_dashboard(&snap, Theme::Dark).unwrap();
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn theme_changes_only_style_tokens() {
        let snap = snapshot(vec![record("A", 7.2), record("B", 6.1)], false);
        let dark = build_dashboard(&snap, Theme::Dark).unwrap();
        let light = build_dashboard(&snap, Theme::Light).unwrap();
        assert_ne!(dark.histogram.style, light.histogram.style);
        assert_eq!(dark.histogram.data, light.histogram.data);
        assert_eq!(dark.top_five, light.top_five);
    }
}
