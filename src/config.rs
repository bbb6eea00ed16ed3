use std::path::PathBuf;

/// Directory the app takes its configuration from. There are no CLI flags or
/// environment variables; callers construct the struct explicitly.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory scanned for `cleaned_<YEAR>.csv` files.
    pub data_directory: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
        }
    }
}

impl DashboardConfig {
    pub fn new(data_directory: impl Into<PathBuf>) -> Self {
        Self {
            data_directory: data_directory.into(),
        }
    }
}
