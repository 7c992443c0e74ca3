/// Enhanced analysis file discovery and parsing.
///
/// The acquisition run writes one file per day:
///   <search dir>/enhanced_analysis_YYYY-MM-DD.json
///
/// Only the `detailed_analysis` array is consumed. Other top-level keys are
/// ignored, and a file without the array yields zero records. An entry that
/// is not a valid record (no `location`, say) is skipped with a warning;
/// the rest of the file still loads.

use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::InputConfig;
use crate::model::{HazardRecord, HazmonError};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Deserialize)]
struct AnalysisEnvelope {
    #[serde(default)]
    detailed_analysis: Option<Vec<serde_json::Value>>,
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Validates a `YYYY-MM-DD` report date.
pub fn validate_date(date: &str) -> Result<NaiveDate, HazmonError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| HazmonError::InvalidDate(date.to_string()))
}

/// Yesterday in local time, formatted as a report date.
pub fn default_report_date() -> String {
    (Local::now().date_naive() - Duration::days(1))
        .format(DATE_FORMAT)
        .to_string()
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// File name for `date` under the configured prefix.
pub fn analysis_file_name(date: &str, input: &InputConfig) -> String {
    format!("{}{}.json", input.file_prefix, date)
}

/// Candidate paths in search order.
pub fn candidate_paths(date: &str, input: &InputConfig) -> Vec<PathBuf> {
    let name = analysis_file_name(date, input);
    input.search_dirs.iter().map(|dir| dir.join(&name)).collect()
}

/// Returns the first existing analysis file for `date`.
pub fn locate(date: &str, input: &InputConfig) -> Result<PathBuf, HazmonError> {
    validate_date(date)?;

    let candidates = candidate_paths(date, input);
    for path in &candidates {
        if path.is_file() {
            debug!(path = %path.display(), "found analysis file");
            return Ok(path.clone());
        }
    }

    Err(HazmonError::AnalysisFileNotFound {
        date: date.to_string(),
        searched: candidates,
    })
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parses the `detailed_analysis` records from an enhanced analysis document.
pub fn parse_analysis_json(json: &str) -> Result<Vec<HazardRecord>, serde_json::Error> {
    let envelope: AnalysisEnvelope = serde_json::from_str(json)?;
    let entries = envelope.detailed_analysis.unwrap_or_default();
    let total = entries.len();

    let records: Vec<HazardRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed analysis record");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(skipped = total - records.len(), total, "analysis file had malformed records");
    }
    Ok(records)
}

/// Reads and parses an enhanced analysis file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<HazardRecord>, HazmonError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| HazmonError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_analysis_json(&contents).map_err(|source| HazmonError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), records = records.len(), "loaded analysis records");
    Ok(records)
}
