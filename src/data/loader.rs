use std::path::Path;

use crate::error::{DashboardError, Result};

use super::model::{
    CountryRecord, Snapshot, YearLabel, FREEDOM_COLUMN, REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the snapshot for one year from `<directory>/cleaned_<year>.csv`.
///
/// Pure read; errors:
/// * [`DashboardError::SnapshotNotFound`]   – no file for that year
/// * [`DashboardError::SnapshotMalformed`]  – file is not parseable CSV
/// * [`DashboardError::SnapshotIncomplete`] – a required column is absent
///   (reported wholesale with the exact missing names)
pub fn load_year(directory: &Path, year: YearLabel) -> Result<Snapshot> {
    let path = directory.join(format!("cleaned_{year}.csv"));
    if !path.is_file() {
        return Err(DashboardError::SnapshotNotFound { year, path });
    }

    let mut reader = csv::Reader::from_path(&path)
        .map_err(|e| DashboardError::malformed(year, e))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DashboardError::malformed(year, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // Column presence is validated up front; a missing column rejects the
    // snapshot wholesale rather than degrading per row.
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::SnapshotIncomplete { missing });
    }

    // All required positions exist after the gate above; the fallback is
    // unreachable.
    let col = |name: &str| headers.iter().position(|h| h == name);
    let idx_country = col("Country").unwrap_or_default();
    let idx_region = col("Region").unwrap_or_default();
    let idx_rank = col("Happiness Rank").unwrap_or_default();
    let idx_score = col("Happiness Score").unwrap_or_default();
    let idx_gdp = col("GDP per capita").unwrap_or_default();
    let idx_social = col("Social support").unwrap_or_default();
    let idx_health = col("Healthy life expectancy").unwrap_or_default();
    let idx_generosity = col("Generosity").unwrap_or_default();
    let idx_dystopia = col("Dystopia Residual").unwrap_or_default();
    let idx_freedom = col(FREEDOM_COLUMN);

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DashboardError::malformed(year, e))?;
        match parse_row(
            &record,
            RowIndices {
                country: idx_country,
                region: idx_region,
                rank: idx_rank,
                score: idx_score,
                gdp: idx_gdp,
                social: idx_social,
                health: idx_health,
                generosity: idx_generosity,
                dystopia: idx_dystopia,
                freedom: idx_freedom,
            },
        ) {
            Some(rec) => records.push(rec),
            None => {
                // Null or unparsable required cell: the row does not
                // participate in rendering, the snapshot survives.
                log::warn!("cleaned_{year}.csv row {row_no}: incomplete record skipped");
            }
        }
    }

    // Recognized columns only, in source order; export replays this order.
    let columns: Vec<String> = headers
        .into_iter()
        .filter(|h| REQUIRED_COLUMNS.contains(&h.as_str()) || h == FREEDOM_COLUMN)
        .collect();
    let has_freedom = idx_freedom.is_some();

    log::info!("loaded {} record(s) for {year}", records.len());
    Ok(Snapshot {
        year,
        records,
        columns,
        has_freedom,
    })
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

struct RowIndices {
    country: usize,
    region: usize,
    rank: usize,
    score: usize,
    gdp: usize,
    social: usize,
    health: usize,
    generosity: usize,
    dystopia: usize,
    freedom: Option<usize>,
}

fn parse_row(record: &csv::StringRecord, idx: RowIndices) -> Option<CountryRecord> {
    let text = |i: usize| {
        let s = record.get(i)?.trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    let real = |i: usize| record.get(i)?.trim().parse::<f64>().ok();

    Some(CountryRecord {
        country: text(idx.country)?,
        region: text(idx.region)?,
        happiness_rank: record.get(idx.rank)?.trim().parse::<u32>().ok()?,
        happiness_score: real(idx.score)?,
        gdp_per_capita: real(idx.gdp)?,
        social_support: real(idx.social)?,
        healthy_life_expectancy: real(idx.health)?,
        generosity: real(idx.generosity)?,
        dystopia_residual: real(idx.dystopia)?,
        // Freedom stays optional per record as well: a blank cell is None.
        freedom: idx.freedom.and_then(real),
    })
}
