/// Plain-text rendering of a `DailyReport`.
///
/// Sites are rendered in the report's ranked order. The console layout
/// (`render`) ends each site with its hazard timeline; the saved layout
/// (`render_saved`) stops after the weather alerts.

use std::fmt::Write;

use crate::analysis::periods::{describe_hours, occurrence_hours};
use crate::model::{DailyReport, SiteSummary, HAZARD_FLOOD, HAZARD_HEAT_INDEX};

const RULE_WIDE: usize = 80;
const RULE_SITE: usize = 60;

/// Breakdown label for a hazard type.
///
/// `heat_index_risk` and `precipitation_flood_risk` have fixed labels;
/// anything else falls back to `title_case`.
pub fn display_name(hazard_type: &str) -> String {
    match hazard_type {
        HAZARD_HEAT_INDEX => "Heat Index Risk".to_string(),
        HAZARD_FLOOD => "Flood Risk".to_string(),
        other => title_case(other),
    }
}

/// Underscores become spaces and every word is capitalized:
/// `precipitation_flood_risk` reads "Precipitation Flood Risk".
pub fn title_case(raw: &str) -> String {
    raw.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Console,
    Saved,
}

/// Renders the console report, timelines included.
pub fn render(report: &DailyReport) -> String {
    render_layout(report, Layout::Console)
}

/// Renders the report as written to the `.txt` file, without timelines.
pub fn render_saved(report: &DailyReport) -> String {
    render_layout(report, Layout::Saved)
}

fn render_layout(report: &DailyReport, layout: Layout) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "DETENTION CENTER WEATHER ANALYSIS - {}", report.date);
    let _ = writeln!(output, "{}", "=".repeat(RULE_WIDE));
    let _ = writeln!(output, "Total Centers Analyzed: {}", report.total_centers);
    let _ = writeln!(output, "Analysis Timestamp: {}", report.analysis_timestamp);

    if report.centers.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "No analysis records for this date.");
    }

    for (site, summary) in report.centers.iter() {
        render_site(&mut output, site, summary, layout);
    }

    output
}

fn render_site(output: &mut String, site: &str, summary: &SiteSummary, layout: Layout) {
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", "=".repeat(RULE_SITE));
    let _ = writeln!(output, "📍 {}", site.to_uppercase());
    let _ = writeln!(output, "{}", "=".repeat(RULE_SITE));

    let _ = writeln!(output, "Total Hazard Detections: {}", summary.total_hazards);
    let _ = writeln!(output, "Hours of Data: {}/24", summary.hours_covered);
    let _ = writeln!(output, "Unique Hazard Types: {}", summary.unique_hazard_types);
    if let Some((hazard_type, count)) = &summary.most_frequent_hazard {
        let _ = writeln!(
            output,
            "Most Frequent Hazard: {} ({} times)",
            title_case(hazard_type),
            count
        );
    }

    let m = &summary.measurements;
    let _ = writeln!(output);
    let _ = writeln!(output, "KEY MEASUREMENTS:");
    if let (Some(min), Some(max)) = (m.heat_index.min, m.heat_index.max) {
        let _ = writeln!(output, "  Heat Index Range: {:.1}°F - {:.1}°F", min, max);
    }
    if let (Some(min), Some(max)) = (m.temperature.min, m.temperature.max) {
        let _ = writeln!(output, "  Temperature Range: {:.1}°F - {:.1}°F", min, max);
    }
    if let Some(max) = m.humidity.max {
        let _ = writeln!(output, "  Maximum Humidity: {:.1}%", max);
    }
    if let Some(max) = m.precipitation.max {
        let _ = writeln!(output, "  Maximum Precipitation: {:.2} in/hr", max);
    }

    if !summary.hazard_summary.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "HAZARD BREAKDOWN:");
        for (hazard_type, count) in summary.hazard_summary.iter() {
            let _ = writeln!(output, "  • {}: {} detections", display_name(hazard_type), count);
        }
    }

    if !m.alerts_detected.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "WEATHER ALERTS:");
        for alert in &m.alerts_detected {
            let _ = writeln!(output, "  • {}", alert);
        }
    }

    if layout == Layout::Console && !summary.hazard_timeline.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "HAZARD TIMELINE:");
        for (hazard_type, hours) in occurrence_hours(&summary.hazard_timeline).iter() {
            let _ = writeln!(
                output,
                "  • {}: {}",
                title_case(hazard_type),
                describe_hours(hours)
            );

            let first = summary
                .hazard_timeline
                .iter()
                .find(|e| e.hazard_type == hazard_type);
            if let Some(entry) = first {
                if let Some(risk) = entry.risk_level.as_deref().filter(|r| !r.is_empty()) {
                    let _ = writeln!(
                        output,
                        "    Risk Level: {} | Severity: {}",
                        risk, entry.severity
                    );
                }
            }
        }
    }
}

/// Closing summary printed after the per-site sections.
pub fn render_quick_summary(report: &DailyReport) -> String {
    let total: usize = report.centers.values().map(|s| s.total_hazards).sum();

    let mut output = String::new();
    let _ = writeln!(output, "QUICK SUMMARY:");
    let _ = writeln!(
        output,
        "• {} total hazard detections across {} centers",
        total,
        report.centers.len()
    );
    let _ = writeln!(
        output,
        "• Each 'hazard detection' = one hazard type found in one hourly reading"
    );
    output
}
