use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::data::model::YearLabel;

// ---------------------------------------------------------------------------
// Dataset catalog – which years are selectable
// ---------------------------------------------------------------------------

const FILE_PREFIX: &str = "cleaned_";
const FILE_SUFFIX: &str = ".csv";

/// The set of years discovered in the data directory, scanned once at
/// startup. Years are kept in an ordered set so the result is stable no
/// matter what order the filesystem enumerates entries in. Duplicate labels
/// collapse (first wins).
#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    directory: PathBuf,
    years: BTreeSet<YearLabel>,
}

impl DatasetCatalog {
    /// Scan the configured directory for `cleaned_<YEAR>.csv` files.
    /// A missing or unreadable directory is session-fatal.
    pub fn scan(config: &DashboardConfig) -> Result<Self> {
        let directory = config.data_directory.clone();
        let entries =
            std::fs::read_dir(&directory).map_err(|source| DashboardError::CatalogUnavailable {
                directory: directory.clone(),
                source,
            })?;

        let mut years = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|source| DashboardError::CatalogUnavailable {
                directory: directory.clone(),
                source,
            })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(year) = year_from_filename(name) {
                years.insert(year);
            } else if name.ends_with(FILE_SUFFIX) {
                log::warn!("ignoring CSV with unrecognized name: {name}");
            }
        }

        log::info!(
            "catalog: {} dataset(s) under {}",
            years.len(),
            directory.display()
        );
        Ok(Self { directory, years })
    }

    /// Available years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = YearLabel> + '_ {
        self.years.iter().copied()
    }

    pub fn contains(&self, year: YearLabel) -> bool {
        self.years.contains(&year)
    }

    /// Most recent year, if any dataset was found.
    pub fn latest(&self) -> Option<YearLabel> {
        self.years.iter().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path the loader expects for a year's file.
    pub fn file_path(&self, year: YearLabel) -> PathBuf {
        self.directory.join(format!("{FILE_PREFIX}{year}{FILE_SUFFIX}"))
    }
}

fn year_from_filename(name: &str) -> Option<YearLabel> {
    let stem = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    YearLabel::parse(stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "Country\n").unwrap();
    }

    #[test]
    fn scan_finds_years_in_ascending_order() {
        let tmp = TempDir::new().unwrap();
        // Write out of order so filesystem enumeration order cannot help.
        for name in [
            "cleaned_2019.csv",
            "cleaned_2015.csv",
            "cleaned_2017.csv",
            "cleaned_2016.csv",
            "cleaned_2018.csv",
        ] {
            touch(tmp.path(), name);
        }
        let catalog = DatasetCatalog::scan(&DashboardConfig::new(tmp.path())).unwrap();
        let years: Vec<u16> = catalog.years().map(|y| y.0).collect();
        assert_eq!(years, vec![2015, 2016, 2017, 2018, 2019]);
        assert_eq!(catalog.latest(), Some(YearLabel(2019)));
    }

    #[test]
    fn scan_ignores_non_matching_names() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "cleaned_2015.csv");
        touch(tmp.path(), "cleaned_raw.csv");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "cleaned_2015.csv.bak");
        let catalog = DatasetCatalog::scan(&DashboardConfig::new(tmp.path())).unwrap();
        assert_eq!(catalog.years().count(), 1);
        assert!(catalog.contains(YearLabel(2015)));
    }

    #[test]
    fn missing_directory_is_catalog_unavailable() {
        let tmp = TempDir::new().unwrap();
        let config = DashboardConfig::new(tmp.path().join("nope"));
        let err = DatasetCatalog::scan(&config).unwrap_err();
        assert!(err.is_session_fatal());
        assert!(matches!(err, DashboardError::CatalogUnavailable { .. }));
    }

    #[test]
    fn file_path_uses_naming_convention() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "cleaned_2016.csv");
        let catalog = DatasetCatalog::scan(&DashboardConfig::new(tmp.path())).unwrap();
        assert_eq!(
            catalog.file_path(YearLabel(2016)),
            tmp.path().join("cleaned_2016.csv")
        );
    }
}
