//! CSV roster import for batch and CLI scoring runs.
//!
//! Service registries commonly hand over pending-obligation exports as
//! flat CSV. The importer normalizes those rows into [`ServiceRecord`]s,
//! applying the engine's field defaults to blank cells. A structurally
//! broken file is a top-level fault and surfaces to the caller.

mod parser;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::engine::domain::ServiceRecord;

/// Reads service rosters from CSV exports.
pub struct ServiceRosterImporter;

impl ServiceRosterImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<ServiceRecord>, RosterImportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RosterImportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ServiceRecord>, RosterImportError> {
        parser::parse_records(reader).map_err(RosterImportError::from)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Service ID,Name,Category,Days Left,Usage Count,Seasonality,Expiry Date\n";

    #[test]
    fn parses_a_complete_roster_row() {
        let csv = format!(
            "{HEADER}101,Passport Renewal,travel,28,4,in_season,2026-01-25\n"
        );
        let records =
            ServiceRosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.service_id, 101);
        assert_eq!(record.name, "Passport Renewal");
        assert_eq!(record.category, "travel");
        assert_eq!(record.days_left, 28);
        assert_eq!(record.usage_count, 4);
        assert_eq!(record.seasonality.as_deref(), Some("in_season"));
        assert_eq!(record.expiry_date.as_deref(), Some("2026-01-25"));
    }

    #[test]
    fn blank_cells_fall_back_to_engine_defaults() {
        let csv = format!("{HEADER}102,Vehicle Inspection,,,,,\n");
        let records =
            ServiceRosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");

        let record = &records[0];
        assert!(record.category.is_empty());
        assert_eq!(record.days_left, 365);
        assert_eq!(record.usage_count, 0);
        assert!(record.seasonality.is_none());
        assert!(record.expiry_date.is_none());
    }

    #[test]
    fn unparseable_numeric_cells_use_defaults_rather_than_failing() {
        let csv = format!("{HEADER}103,National ID Renewal,identity,soon,many,,\n");
        let records =
            ServiceRosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");

        let record = &records[0];
        assert_eq!(record.days_left, 365);
        assert_eq!(record.usage_count, 0);
    }

    #[test]
    fn missing_required_columns_surface_as_an_import_error() {
        let csv = "Name,Category\nPassport Renewal,travel\n";
        let result = ServiceRosterImporter::from_reader(Cursor::new(csv));
        assert!(matches!(result, Err(RosterImportError::Csv(_))));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = ServiceRosterImporter::from_path("/does/not/exist.csv")
            .expect_err("missing file errors");
        assert!(err.to_string().contains("/does/not/exist.csv"));
    }
}
