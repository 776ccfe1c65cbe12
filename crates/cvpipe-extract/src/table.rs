//! CSV aggregation of extracted records
//!
//! One row per successful unit, keyed and sorted by the spreadsheet row
//! number. The column schema follows the backend that produced the run:
//! fixed three-degree columns for the local model, free-text trajectory
//! columns for the hosted one.

use std::path::Path;

use anyhow::{Context, Result};
use cvpipe_core::WorkResult;
use cvpipe_core::successes_by_identity;

use crate::backend::{BackendKind, Record};

/// Serialize successful outcomes as CSV, sorted ascending by identity.
///
/// Failures never reach the file; the run log is their only record.
/// Returns the number of data rows written.
pub fn write_csv(
    path: &Path,
    kind: BackendKind,
    results: Vec<WorkResult<Record>>,
) -> Result<usize> {
    let rows = successes_by_identity(results);

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot create CSV file: {}", path.display()))?;

    match kind {
        BackendKind::Local => {
            writer.write_record(["Row Number", "Bachelors", "Masters", "PhD"])?
        }
        BackendKind::Hosted => writer.write_record([
            "Row Number",
            "education_trajectory",
            "career_trajectory",
        ])?,
    }

    let mut written = 0usize;
    for (identity, record) in rows {
        match record {
            Record::Degrees {
                bachelors,
                masters,
                phd,
            } => writer.write_record([
                identity.to_string(),
                bachelors.unwrap_or_default(),
                masters.unwrap_or_default(),
                phd.unwrap_or_default(),
            ])?,
            Record::Trajectory { education, career } => writer.write_record([
                identity.to_string(),
                education.unwrap_or_default(),
                career.unwrap_or_default(),
            ])?,
        }
        written += 1;
    }

    writer
        .flush()
        .with_context(|| format!("cannot write CSV file: {}", path.display()))?;
    log::info!("wrote {written} rows to {}", path.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvpipe_core::{Outcome, UnitError};

    fn success(identity: u32, record: Record) -> WorkResult<Record> {
        WorkResult {
            identity,
            outcome: Outcome::Success(record),
        }
    }

    fn failure(identity: u32) -> WorkResult<Record> {
        WorkResult {
            identity,
            outcome: Outcome::Failure(UnitError::Pdf {
                message: "no text".to_string(),
            }),
        }
    }

    fn degrees(uni: &str) -> Record {
        Record::Degrees {
            bachelors: Some(uni.to_string()),
            masters: None,
            phd: None,
        }
    }

    #[test]
    fn rows_sorted_failures_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let results = vec![
            success(30, degrees("C")),
            failure(7),
            success(2, degrees("A")),
            success(15, degrees("B")),
        ];

        let written = write_csv(&path, BackendKind::Local, results).unwrap();
        assert_eq!(written, 3);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Row Number,Bachelors,Masters,PhD");
        assert_eq!(lines[1], "2,A,,");
        assert_eq!(lines[2], "15,B,,");
        assert_eq!(lines[3], "30,C,,");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn hosted_schema_has_trajectory_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let results = vec![success(
            4,
            Record::Trajectory {
                education: Some("B.A., MIT, 2001".to_string()),
                career: None,
            },
        )];

        write_csv(&path, BackendKind::Hosted, results).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Row Number,education_trajectory,career_trajectory"
        );
        assert_eq!(lines[1], "4,\"B.A., MIT, 2001\",");
    }

    #[test]
    fn all_failures_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let written =
            write_csv(&path, BackendKind::Local, vec![failure(1), failure(2)]).unwrap();
        assert_eq!(written, 0);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
