/// Hazard period reconstruction and occurrence-pattern classification.
///
/// # Period Reconstruction
///
/// Records are walked in chronological order while tracking the set of
/// hazard types present in the previous record:
///
/// - a type present now but not previously opens a new period at this hour
/// - a type present now and previously extends its latest period
/// - a type absent now is closed implicitly; if it reappears later it opens
///   a fresh period
///
/// A record with no hazards therefore breaks every running period.
///
/// # Pattern Classification
///
/// Independently of periods, a type's set of distinct occurrence hours is
/// *continuous* when it forms an unbroken run (`max - min == count - 1`)
/// and *intermittent* otherwise.

use std::collections::{BTreeSet, HashSet};

use tracing::warn;

use crate::analysis::normalize::NormalizedRecord;
use crate::model::{HazardPeriod, OrderedMap, TimelineEntry};

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

/// Builds the period list of every hazard type seen across `records`.
///
/// `records` must already be in chronological order (see
/// `normalize::normalize_site`). Types are keyed in first-seen order and
/// each type's periods are in chronological order.
pub fn reconstruct_periods(records: &[NormalizedRecord<'_>]) -> OrderedMap<Vec<HazardPeriod>> {
    let mut periods: OrderedMap<Vec<HazardPeriod>> = OrderedMap::new();
    let mut active: HashSet<&str> = HashSet::new();

    for rec in records {
        let mut present: HashSet<&str> = HashSet::new();

        for hazard in &rec.record.hazards {
            let hazard_type = hazard.hazard_type.as_str();
            // Duplicate entries of a type within one record are one occurrence.
            if !present.insert(hazard_type) {
                continue;
            }

            if active.contains(hazard_type) {
                if let Some(current) = periods.get_mut(hazard_type).and_then(|p| p.last_mut()) {
                    current.extend_to(rec.hour);
                    if current.is_backwards() {
                        warn!(
                            site = %rec.record.site_id,
                            hazard_type,
                            start_hour = current.start_hour,
                            end_hour = current.end_hour,
                            duration = current.duration,
                            "period ends before it starts"
                        );
                    }
                }
            } else {
                periods
                    .get_or_insert_with(hazard_type, Vec::new)
                    .push(HazardPeriod::opened_at(rec.hour));
            }
        }

        active = present;
    }

    periods
}

// ---------------------------------------------------------------------------
// Pattern classification
// ---------------------------------------------------------------------------

/// Day-long occurrence pattern of one hazard type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrencePattern {
    Continuous,
    Intermittent,
}

impl OccurrencePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            OccurrencePattern::Continuous => "continuous",
            OccurrencePattern::Intermittent => "intermittent",
        }
    }
}

/// Classifies a set of distinct occurrence hours. `None` for an empty set.
pub fn classify_hours(hours: &BTreeSet<u32>) -> Option<OccurrencePattern> {
    let first = *hours.first()?;
    let last = *hours.last()?;
    if (last - first) as usize == hours.len() - 1 {
        Some(OccurrencePattern::Continuous)
    } else {
        Some(OccurrencePattern::Intermittent)
    }
}

/// Distinct occurrence hours of each hazard type on a timeline, keyed in
/// first-seen order.
pub fn occurrence_hours(timeline: &[TimelineEntry]) -> OrderedMap<BTreeSet<u32>> {
    let mut by_type: OrderedMap<BTreeSet<u32>> = OrderedMap::new();
    for entry in timeline {
        by_type
            .get_or_insert_with(&entry.hazard_type, BTreeSet::new)
            .insert(entry.hour);
    }
    by_type
}

/// Human-readable summary of occurrence hours.
///
/// Three or fewer hours are listed (`"10:00, 14:00"`); longer sets are
/// shown as a range when continuous (`"10:00 - 15:00 (continuous)"`) or a
/// count when intermittent (`"7 hours total (intermittent)"`).
pub fn describe_hours(hours: &BTreeSet<u32>) -> String {
    if hours.len() <= 3 {
        return hours
            .iter()
            .map(|h| format!("{:02}:00", h))
            .collect::<Vec<_>>()
            .join(", ");
    }

    match classify_hours(hours) {
        Some(OccurrencePattern::Continuous) => format!(
            "{:02}:00 - {:02}:00 (continuous)",
            hours.first().copied().unwrap_or_default(),
            hours.last().copied().unwrap_or_default()
        ),
        _ => format!("{} hours total (intermittent)", hours.len()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
