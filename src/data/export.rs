use crate::error::{DashboardError, Result};

use super::model::Snapshot;

// ---------------------------------------------------------------------------
// CSV export – the download button's payload
// ---------------------------------------------------------------------------

pub const EXPORT_MIME: &str = "text/csv";

/// Suggested filename for the download, `world_happiness_<year>.csv`.
pub fn export_filename(snapshot: &Snapshot) -> String {
    format!("world_happiness_{}.csv", snapshot.year)
}

/// Serialize the snapshot back to CSV bytes, reproducing the recognized
/// columns in the order they appeared in the source file.
pub fn write_csv(snapshot: &Snapshot) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(&snapshot.columns)
        .map_err(|e| DashboardError::malformed(snapshot.year, e))?;

    for rec in &snapshot.records {
        let row: Vec<String> = snapshot
            .columns
            .iter()
            .map(|col| rec.field(col).unwrap_or_default())
            .collect();
        writer
            .write_record(&row)
            .map_err(|e| DashboardError::malformed(snapshot.year, e))?;
    }

    writer
        .into_inner()
        .map_err(|e| DashboardError::malformed(snapshot.year, e))
}
