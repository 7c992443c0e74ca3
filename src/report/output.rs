/// Report file writer.
///
/// Writes, for a report dated D:
///   <reports_dir>/<json_prefix>D.json — pretty-printed `DailyReport`
///   <reports_dir>/<text_prefix>D.txt  — `text::render_saved` output

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::OutputConfig;
use crate::model::{DailyReport, HazmonError};
use crate::report::text;

/// Paths of the files written for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    pub json_path: PathBuf,
    pub text_path: PathBuf,
}

fn write_file(path: &Path, contents: &str) -> Result<(), HazmonError> {
    fs::write(path, contents).map_err(|source| HazmonError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes both report files into `output.reports_dir`, creating it if needed.
pub fn write_reports(
    report: &DailyReport,
    output: &OutputConfig,
) -> Result<WrittenReports, HazmonError> {
    let dir = &output.reports_dir;
    fs::create_dir_all(dir).map_err(|source| HazmonError::Io {
        path: dir.clone(),
        source,
    })?;

    let json_path = dir.join(format!("{}{}.json", output.json_prefix, report.date));
    let json = serde_json::to_string_pretty(report)?;
    write_file(&json_path, &json)?;

    let text_path = dir.join(format!("{}{}.txt", output.text_prefix, report.date));
    write_file(&text_path, &text::render_saved(report))?;

    info!(
        json = %json_path.display(),
        text = %text_path.display(),
        "wrote reports"
    );

    Ok(WrittenReports { json_path, text_path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::daily_report::build_report;
    use crate::ingest::{analysis_file::parse_analysis_json, fixtures::*};
    use chrono::NaiveDate;

    fn ranking_report() -> DailyReport {
        let records = parse_analysis_json(fixture_ranking_json()).expect("parse");
        let generated_at = NaiveDate::from_ymd_opt(2025, 7, 15)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid timestamp");
        build_report("2025-07-14", records, generated_at)
    }

    fn output_in(dir: &Path) -> OutputConfig {
        OutputConfig {
            reports_dir: dir.to_path_buf(),
            ..OutputConfig::default()
        }
    }

    #[test]
    fn test_write_reports_creates_nested_dir_and_files() {
        let root = tempfile::tempdir().expect("tempdir");
        let output = output_in(&root.path().join("nested/center_reports"));

        let written = write_reports(&ranking_report(), &output).expect("reports should write");

        assert_eq!(
            written.json_path,
            output.reports_dir.join("center_analysis_2025-07-14.json")
        );
        assert_eq!(
            written.text_path,
            output.reports_dir.join("center_report_2025-07-14.txt")
        );
        assert!(written.json_path.is_file());
        assert!(written.text_path.is_file());
    }

    #[test]
    fn test_json_report_keeps_ranked_center_order() {
        let root = tempfile::tempdir().expect("tempdir");
        let written = write_reports(&ranking_report(), &output_in(root.path())).expect("write");

        let json = fs::read_to_string(&written.json_path).expect("read json");
        let bravo = json.find("\"Bravo\"").expect("Bravo key");
        let alpha = json.find("\"Alpha\"").expect("Alpha key");
        let delta = json.find("\"Delta\"").expect("Delta key");
        assert!(bravo < alpha && alpha < delta, "centers must serialize in ranked order");

        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["total_centers"], 4);
        assert_eq!(value["centers"]["Bravo"]["total_hazards"], 3);
    }

    #[test]
    fn test_text_report_matches_renderer() {
        let root = tempfile::tempdir().expect("tempdir");
        let report = ranking_report();
        let written = write_reports(&report, &output_in(root.path())).expect("write");

        let text = fs::read_to_string(&written.text_path).expect("read text");
        assert_eq!(text, text::render_saved(&report));
        assert!(!text.contains("HAZARD TIMELINE"));
    }

    #[test]
    fn test_custom_prefixes() {
        let root = tempfile::tempdir().expect("tempdir");
        let output = OutputConfig {
            reports_dir: root.path().to_path_buf(),
            json_prefix: "sites_".to_string(),
            text_prefix: "sites_".to_string(),
        };
        let written = write_reports(&ranking_report(), &output).expect("write");

        assert_eq!(written.json_path, root.path().join("sites_2025-07-14.json"));
        assert_eq!(written.text_path, root.path().join("sites_2025-07-14.txt"));
    }

    #[test]
    fn test_unwritable_dir_is_io_error() {
        let root = tempfile::tempdir().expect("tempdir");
        let blocker = root.path().join("not_a_dir");
        fs::write(&blocker, "").expect("write blocker file");

        let err = write_reports(&ranking_report(), &output_in(&blocker)).unwrap_err();
        assert!(matches!(err, HazmonError::Io { .. }));
    }
}
