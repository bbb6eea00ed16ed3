//! End-to-end tests: catalog → loader → builder → export.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use happy_atlas::charts::builder::build_dashboard;
use happy_atlas::charts::spec::ChartData;
use happy_atlas::config::DashboardConfig;
use happy_atlas::data::catalog::DatasetCatalog;
use happy_atlas::data::export::{export_filename, write_csv};
use happy_atlas::data::loader::load_year;
use happy_atlas::data::model::YearLabel;
use happy_atlas::error::DashboardError;
use happy_atlas::state::AppState;
use happy_atlas::theme::Theme;

const HEADER: &str = "Country,Region,Happiness Rank,Happiness Score,\
GDP per capita,Social support,Healthy life expectancy,Generosity,Dystopia Residual,Freedom";

fn write_fixture(dir: &Path, year: u16) {
    let body = format!(
        "{HEADER}\n\
         Norway,Western Europe,1,7.537,1.616,1.534,0.797,0.362,2.277,0.635\n\
         Denmark,Western Europe,2,7.522,1.482,1.551,0.793,0.355,2.313,0.626\n\
         Iceland,Western Europe,3,7.504,1.481,1.611,0.834,0.476,2.323,0.627\n\
         Kenya,Sub-Saharan Africa,112,4.553,0.56,1.067,0.316,0.472,1.783,0.453\n\
         Togo,Sub-Saharan Africa,150,3.495,0.305,0.432,0.247,0.196,2.14,0.38\n\
         Syria,Middle East and Northern Africa,152,3.462,0.777,0.396,0.5,0.494,1.062,0.082\n"
    );
    fs::write(dir.join(format!("cleaned_{year}.csv")), body).unwrap();
}

#[test]
fn catalog_enumerates_every_year_in_order() {
    let tmp = TempDir::new().unwrap();
    for year in [2019u16, 2016, 2015, 2018, 2017] {
        write_fixture(tmp.path(), year);
    }
    let catalog = DatasetCatalog::scan(&DashboardConfig::new(tmp.path())).unwrap();
    let years: Vec<u16> = catalog.years().map(|y| y.0).collect();
    assert_eq!(years, vec![2015, 2016, 2017, 2018, 2019]);
}

#[test]
fn loaded_row_count_matches_the_file() {
    let tmp = TempDir::new().unwrap();
    write_fixture(tmp.path(), 2017);
    let snapshot = load_year(tmp.path(), YearLabel(2017)).unwrap();
    assert_eq!(snapshot.len(), 6);
}

#[test]
fn export_round_trip_is_a_fixpoint() {
    let tmp = TempDir::new().unwrap();
    write_fixture(tmp.path(), 2017);

    let first = load_year(tmp.path(), YearLabel(2017)).unwrap();
    let bytes = write_csv(&first).unwrap();
    assert_eq!(export_filename(&first), "world_happiness_2017.csv");

    fs::create_dir(tmp.path().join("exported")).unwrap();
    fs::write(tmp.path().join("exported").join("cleaned_2017.csv"), bytes).unwrap();
    let second = load_year(&tmp.path().join("exported"), YearLabel(2017)).unwrap();

    assert_eq!(first.columns, second.columns);
    assert_eq!(first.records, second.records);
    assert_eq!(first.has_freedom, second.has_freedom);
}

#[test]
fn dashboard_build_reflects_the_fixture() {
    let tmp = TempDir::new().unwrap();
    write_fixture(tmp.path(), 2017);

    let snapshot = load_year(tmp.path(), YearLabel(2017)).unwrap();
    let view = build_dashboard(&snapshot, Theme::Dark).unwrap();

    assert_eq!(view.year, YearLabel(2017));
    assert_eq!(view.top_five.len(), 5);
    assert_eq!(view.top_five[0].country, "Norway");
    assert!(view.top_five.iter().all(|r| r.fill_fraction <= 1.0));

    let extremes = view.freedom.expect("fixture has a Freedom column");
    assert_eq!(extremes.most_free.country, "Norway");
    assert_eq!(extremes.least_free.country, "Syria");
    assert!((extremes.difference - 0.553).abs() < 1e-9);

    match &view.choropleth.data {
        ChartData::Choropleth {
            entries,
            score_min,
            score_max,
            ..
        } => {
            assert_eq!(entries.len(), 6);
            assert_eq!(*score_min, 3.462);
            assert_eq!(*score_max, 7.537);
            assert_eq!(entries[0].tooltip.len(), 8);
        }
        other => panic!("expected choropleth data, got {other:?}"),
    }

    match &view.histogram.data {
        ChartData::Histogram { bins } => {
            assert_eq!(bins.len(), 20);
            assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 6);
        }
        other => panic!("expected histogram data, got {other:?}"),
    }

    match (&view.line.data, &view.bar.data) {
        (ChartData::Line { points }, ChartData::Bar { bars }) => {
            assert_eq!(points.len(), 6);
            // Line keeps input order; bar repeats the top-5 selection.
            assert_eq!(points[0].country, "Norway");
            assert_eq!(points[5].country, "Syria");
            assert_eq!(bars.len(), 5);
            assert_eq!(bars[0].country, "Norway");
        }
        other => panic!("expected line and bar data, got {other:?}"),
    }
}

#[test]
fn rebuilding_from_the_same_file_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    write_fixture(tmp.path(), 2016);

    let a = build_dashboard(
        &load_year(tmp.path(), YearLabel(2016)).unwrap(),
        Theme::Light,
    )
    .unwrap();
    let b = build_dashboard(
        &load_year(tmp.path(), YearLabel(2016)).unwrap(),
        Theme::Light,
    )
    .unwrap();
    assert_eq!(
        serde_json::to_vec(&a).unwrap(),
        serde_json::to_vec(&b).unwrap()
    );
}

#[test]
fn missing_year_and_missing_directory_fail_distinctly() {
    let tmp = TempDir::new().unwrap();
    write_fixture(tmp.path(), 2015);

    let err = load_year(tmp.path(), YearLabel(2020)).unwrap_err();
    assert!(matches!(err, DashboardError::SnapshotNotFound { .. }));
    assert!(!err.is_session_fatal());

    let err = DatasetCatalog::scan(&DashboardConfig::new(tmp.path().join("missing"))).unwrap_err();
    assert!(err.is_session_fatal());
}

#[test]
fn app_state_runs_one_full_render_cycle() {
    let tmp = TempDir::new().unwrap();
    write_fixture(tmp.path(), 2015);
    write_fixture(tmp.path(), 2019);

    let mut state = AppState::new(DashboardConfig::new(tmp.path())).unwrap();
    assert_eq!(state.selected_year, Some(YearLabel(2019)));
    assert!(state.dashboard.is_some());

    state.select_year(YearLabel(2015));
    assert_eq!(state.selected_year, Some(YearLabel(2015)));
    let (name, bytes) = state.export_payload().unwrap();
    assert_eq!(name, "world_happiness_2015.csv");
    assert!(bytes.starts_with(b"Country,"));
}
