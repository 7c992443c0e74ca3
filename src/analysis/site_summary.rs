/// Per-site summarization.
///
/// Composes normalization, extraction, period reconstruction and
/// measurement aggregation into one `SiteSummary`. Records for other sites
/// must already have been filtered out (see `groupings::group_by_site`).

use std::collections::BTreeSet;

use tracing::debug;

use crate::analysis::extract::{extract_events, tally, HazardEvent};
use crate::analysis::measurements;
use crate::analysis::normalize::normalize_site;
use crate::analysis::periods::reconstruct_periods;
use crate::model::{HazardRecord, SiteSummary, TimelineEntry, HAZARD_WEATHER_ALERT};

/// Summarizes one site's day with the default alert hazard type.
pub fn summarize_site(records: &[HazardRecord]) -> SiteSummary {
    summarize_site_with(records, HAZARD_WEATHER_ALERT)
}

/// Summarizes one site's day, collecting alert headlines from hazards of
/// `alert_type`.
pub fn summarize_site_with(records: &[HazardRecord], alert_type: &str) -> SiteSummary {
    let normalized = normalize_site(records);

    let events: Vec<HazardEvent> = normalized.iter().flat_map(extract_events).collect();
    let counts = tally(&events);
    let hazard_timeline: Vec<TimelineEntry> = events.iter().map(TimelineEntry::from).collect();
    let hours_covered = events.iter().map(|e| e.hour).collect::<BTreeSet<u32>>().len();

    let hazard_periods = reconstruct_periods(&normalized);
    let measurements = measurements::aggregate(normalized.iter().map(|n| n.record), alert_type);

    let summary = SiteSummary {
        total_records: normalized.len(),
        total_hazards: counts.total,
        unique_hazard_types: counts.by_type.len(),
        most_frequent_hazard: counts.most_frequent(),
        hazard_summary: counts.by_type,
        hazard_timeline,
        hazard_periods,
        measurements,
        hours_covered,
    };

    if let Some(first) = records.first() {
        debug!(
            site = %first.site_id,
            records = summary.total_records,
            hazards = summary.total_hazards,
            hours_covered = summary.hours_covered,
            "summarized site"
        );
    }

    summary
}
