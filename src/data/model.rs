use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// YearLabel – identifies one dataset snapshot
// ---------------------------------------------------------------------------

/// The year a snapshot covers, parsed from a `cleaned_<YEAR>.csv` filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearLabel(pub u16);

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl YearLabel {
    /// Parse a label from the `<YEAR>` part of a filename. Only all-digit
    /// labels are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<u16>().ok().map(YearLabel)
    }
}

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

/// Header names a snapshot must carry to be renderable (case-sensitive,
/// exact match). `Freedom` is optional and deliberately not listed.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Country",
    "Happiness Score",
    "Happiness Rank",
    "Region",
    "GDP per capita",
    "Social support",
    "Healthy life expectancy",
    "Generosity",
    "Dystopia Residual",
];

pub const FREEDOM_COLUMN: &str = "Freedom";

// ---------------------------------------------------------------------------
// CountryRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single country's metrics for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    pub country: String,
    pub region: String,
    pub happiness_rank: u32,
    pub happiness_score: f64,
    pub gdp_per_capita: f64,
    pub social_support: f64,
    pub healthy_life_expectancy: f64,
    pub generosity: f64,
    pub dystopia_residual: f64,
    /// Present only when the source file carries a `Freedom` column.
    pub freedom: Option<f64>,
}

impl CountryRecord {
    /// Cell value for a recognized column name, formatted for CSV export.
    pub fn field(&self, column: &str) -> Option<String> {
        let s = match column {
            "Country" => self.country.clone(),
            "Region" => self.region.clone(),
            "Happiness Rank" => self.happiness_rank.to_string(),
            "Happiness Score" => format_float(self.happiness_score),
            "GDP per capita" => format_float(self.gdp_per_capita),
            "Social support" => format_float(self.social_support),
            "Healthy life expectancy" => format_float(self.healthy_life_expectancy),
            "Generosity" => format_float(self.generosity),
            "Dystopia Residual" => format_float(self.dystopia_residual),
            FREEDOM_COLUMN => format_float(self.freedom?),
            _ => return None,
        };
        Some(s)
    }
}

/// Shortest decimal representation that parses back to the same `f64`, so a
/// load → export → load cycle is a fixpoint.
pub(crate) fn format_float(v: f64) -> String {
    format!("{v}")
}

// ---------------------------------------------------------------------------
// Snapshot – the complete dataset for one year
// ---------------------------------------------------------------------------

/// All country records for one year, in file order. Owned by a single
/// render cycle; nothing retains it across year changes.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub year: YearLabel,
    pub records: Vec<CountryRecord>,
    /// Recognized column names in the order they appeared in the source
    /// file; export reproduces exactly this order.
    pub columns: Vec<String>,
    pub has_freedom: bool,
}

impl Snapshot {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_label_accepts_digits_only() {
        assert_eq!(YearLabel::parse("2017"), Some(YearLabel(2017)));
        assert_eq!(YearLabel::parse(""), None);
        assert_eq!(YearLabel::parse("20a7"), None);
        assert_eq!(YearLabel::parse("-2017"), None);
    }

    #[test]
    fn float_formatting_round_trips() {
        for v in [7.537, 0.0, 10.0, 1.5e-3, 9.999999999] {
            let s = format_float(v);
            assert_eq!(s.parse::<f64>().unwrap(), v, "{s}");
        }
    }

    #[test]
    fn field_lookup_covers_every_required_column() {
        let rec = CountryRecord {
            country: "Norway".into(),
            region: "Western Europe".into(),
            happiness_rank: 1,
            happiness_score: 7.537,
            gdp_per_capita: 1.616,
            social_support: 1.534,
            healthy_life_expectancy: 0.797,
            generosity: 0.362,
            dystopia_residual: 2.277,
            freedom: None,
        };
        for col in REQUIRED_COLUMNS {
            assert!(rec.field(col).is_some(), "{col}");
        }
        assert_eq!(rec.field(FREEDOM_COLUMN), None);
        assert_eq!(rec.field("Unknown"), None);
    }
}
