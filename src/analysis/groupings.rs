/// Per-site batching of parsed records.
///
/// A record belongs to the batch whose key equals its `site_id` exactly.
/// Batches are keyed in first-seen order and hold records as they arrived;
/// `normalize::normalize_site` sorts them by hour afterwards.
///
/// The tests below run parse, group and summarize end to end on the
/// shared fixtures.

use crate::model::{HazardRecord, OrderedMap};

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Groups a flat list of records into per-site batches keyed by site id.
pub fn group_by_site(records: Vec<HazardRecord>) -> OrderedMap<Vec<HazardRecord>> {
    let mut grouped: OrderedMap<Vec<HazardRecord>> = OrderedMap::new();

    for record in records {
        // Get or create the batch for this site, then append
        grouped
            .get_or_insert_with(&record.site_id, Vec::new)
            .push(record);
    }

    grouped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::site_summary::summarize_site;
    use crate::ingest::{analysis_file::parse_analysis_json, fixtures::*};
    use crate::model::{HazardPeriod, RawMeasurements, HAZARD_HEAT_INDEX};

    fn bare(site: &str, ts: &str) -> HazardRecord {
        HazardRecord {
            site_id: site.to_string(),
            timestamp: Some(ts.to_string()),
            hazards: vec![],
            measurements: RawMeasurements::default(),
        }
    }

    // --- Grouping: basic correctness ----------------------------------------

    #[test]
    fn test_group_by_site_preserves_first_seen_site_order() {
        let records = vec![
            bare("Krome", "2025-07-14T01:00:00"),
            bare("Otay Mesa", "2025-07-14T01:00:00"),
            bare("Krome", "2025-07-14T02:00:00"),
            bare("Adelanto", "2025-07-14T01:00:00"),
        ];
        let grouped = group_by_site(records);

        assert_eq!(
            grouped.keys().collect::<Vec<_>>(),
            vec!["Krome", "Otay Mesa", "Adelanto"]
        );
        assert_eq!(grouped.get("Krome").map(Vec::len), Some(2));
    }

    #[test]
    fn test_group_by_site_keeps_arrival_order_within_site() {
        let records = vec![
            bare("Krome", "2025-07-14T05:00:00"),
            bare("Krome", "2025-07-14T02:00:00"),
        ];
        let grouped = group_by_site(records);
        let krome = grouped.get("Krome").expect("Krome should be grouped");

        assert_eq!(krome[0].timestamp.as_deref(), Some("2025-07-14T05:00:00"));
        assert_eq!(krome[1].timestamp.as_deref(), Some("2025-07-14T02:00:00"));
    }

    #[test]
    fn test_group_by_site_key_is_exact_match() {
        let records = vec![bare("Krome", "t"), bare("krome", "t"), bare("Krome ", "t")];
        let grouped = group_by_site(records);
        assert_eq!(grouped.len(), 3, "case and whitespace differences are distinct sites");
    }

    #[test]
    fn test_group_by_site_empty_input_returns_empty_map() {
        let grouped = group_by_site(vec![]);
        assert!(grouped.is_empty(), "empty input should produce empty map");
    }

    // --- Integration: parse → group → summarize -----------------------------

    #[test]
    fn test_pipeline_two_center_fixture() {
        let records = parse_analysis_json(fixture_two_center_day_json())
            .expect("fixture should parse");
        let grouped = group_by_site(records);

        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["Krome", "Otay Mesa"]);

        let krome = summarize_site(grouped.get("Krome").expect("Krome should be present"));
        assert_eq!(krome.total_records, 4);
        assert_eq!(krome.total_hazards, 5);
        assert_eq!(
            krome.hazard_periods.get(HAZARD_HEAT_INDEX),
            Some(&vec![HazardPeriod { start_hour: 13, end_hour: 15, duration: 3 }])
        );
        assert_eq!(krome.measurements.heat_index.max, Some(112.4));
        assert_eq!(krome.measurements.heat_index.min, Some(96.0));
        assert_eq!(krome.measurements.temperature.max, Some(97.1));
        assert_eq!(
            krome.measurements.alerts_detected,
            vec!["Excessive Heat Warning"],
            "repeated alert headline should be listed once"
        );
        assert_eq!(krome.hours_covered, 3);

        let otay = summarize_site(grouped.get("Otay Mesa").expect("Otay Mesa should be present"));
        assert_eq!(otay.total_hazards, 0);
        assert!(otay.most_frequent_hazard.is_none());
        assert_eq!(otay.measurements.temperature.max, Some(78.0));
        assert_eq!(otay.measurements.humidity.max, None, "null humidity stays absent");
    }

    #[test]
    fn test_pipeline_malformed_timestamp_falls_back_to_position() {
        let records = parse_analysis_json(fixture_malformed_timestamps_json())
            .expect("fixture should parse");
        let grouped = group_by_site(records);
        let site = summarize_site(grouped.get("Adelanto").expect("Adelanto should be present"));

        // Sorted: "" (pos 0), "2025-07-14T01:00:00" (hour 1), "garbage" (pos 2)
        let hours: Vec<u32> = site.hazard_timeline.iter().map(|e| e.hour).collect();
        assert_eq!(hours, vec![0, 1, 2]);
        assert_eq!(
            site.hazard_periods.get("precipitation_flood_risk"),
            Some(&vec![HazardPeriod { start_hour: 0, end_hour: 2, duration: 3 }])
        );
        assert_eq!(site.hazard_timeline[0].timestamp, "");
    }
}
