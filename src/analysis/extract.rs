/// Hazard extraction and counting.
///
/// Every entry in a record's `hazard_analysis` list becomes one
/// `HazardEvent`, duplicates included. Counts are accumulated by folding
/// events into a `HazardTally` rather than by bumping shared counters.

use crate::analysis::normalize::NormalizedRecord;
use crate::model::{HazardObservation, HazardRecord, OrderedMap, TimelineEntry};

/// One hazard observed at one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardEvent<'a> {
    pub hour: u32,
    pub hazard: &'a HazardObservation,
    /// Raw timestamp of the source record ("" if absent).
    pub timestamp: &'a str,
}

/// Yields one event per hazard entry of `record`, in list order.
pub fn extract_events<'a>(
    record: &NormalizedRecord<'a>,
) -> impl Iterator<Item = HazardEvent<'a>> + use<'a> {
    let hour = record.hour;
    let timestamp = record.raw_timestamp();
    let source: &'a HazardRecord = record.record;
    source
        .hazards
        .iter()
        .map(move |hazard| HazardEvent {
            hour,
            hazard,
            timestamp,
        })
}

impl From<&HazardEvent<'_>> for TimelineEntry {
    fn from(event: &HazardEvent<'_>) -> Self {
        TimelineEntry {
            hour: event.hour,
            hazard_type: event.hazard.hazard_type.clone(),
            severity: event.hazard.severity.clone(),
            description: event.hazard.description.clone(),
            measurement: event.hazard.measurement.clone(),
            risk_level: event.hazard.risk_level.clone(),
            timestamp: event.timestamp.to_string(),
        }
    }
}

/// Total and per-type hazard counts for a site.
///
/// `by_type` is keyed in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardTally {
    pub total: usize,
    pub by_type: OrderedMap<usize>,
}

impl HazardTally {
    pub fn add(mut self, event: &HazardEvent<'_>) -> Self {
        self.total += 1;
        *self.by_type.get_or_insert_with(&event.hazard.hazard_type, || 0) += 1;
        self
    }

    /// The type with the highest count. Ties go to the type seen first.
    pub fn most_frequent(&self) -> Option<(String, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (hazard_type, &count) in self.by_type.iter() {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((hazard_type, count));
            }
        }
        best.map(|(t, c)| (t.to_string(), c))
    }
}

/// Folds events into a tally.
pub fn tally<'e, 'a: 'e, I>(events: I) -> HazardTally
where
    I: IntoIterator<Item = &'e HazardEvent<'a>>,
{
    events.into_iter().fold(HazardTally::default(), HazardTally::add)
}
