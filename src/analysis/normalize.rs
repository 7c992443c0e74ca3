/// Record normalization: chronological ordering and hour-of-day bucketing.
///
/// A site's records arrive in whatever order the acquisition run produced
/// them. `normalize_site` sorts them by raw timestamp string (ISO 8601 sorts
/// correctly as text; missing timestamps sort first) and assigns each an
/// hour bucket.
///
/// When a timestamp is missing or unparseable the hour falls back to the
/// record's position in the sorted batch. That conflates "hour of day" with
/// "index in batch" and is only right for one record per hour starting at
/// midnight. The fallback is kept for compatibility with existing reports;
/// every record produced this way carries `HourSource::Ordinal` and is
/// logged.

use chrono::{NaiveDate, NaiveTime, Timelike};
use tracing::warn;

use crate::model::HazardRecord;

/// Calendar date layouts, extended then basic, with their byte length.
const DATE_FORMATS: &[(&str, usize)] = &[("%Y-%m-%d", 10), ("%Y%m%d", 8)];

/// Time-of-day layouts, extended then basic. Hour-only (`HH`) is handled
/// separately.
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%H%M%S%.f", "%H%M"];

/// Where a normalized record's hour came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourSource {
    /// Parsed from the record's timestamp.
    Timestamp,
    /// Position in the sorted batch; the timestamp was missing or malformed.
    Ordinal,
}

/// A record paired with its hour bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRecord<'a> {
    pub hour: u32,
    pub hour_source: HourSource,
    pub record: &'a HazardRecord,
}

impl<'a> NormalizedRecord<'a> {
    /// Raw timestamp, or the empty string when the record had none.
    pub fn raw_timestamp(&self) -> &'a str {
        sort_key(self.record)
    }
}

/// Extracts the hour-of-day from an ISO 8601 timestamp.
///
/// Accepts extended (`2025-07-14T13:05:00`) and basic (`20250714T130500`)
/// forms, a `T` or space separator, hour, minute or second precision with
/// optional fraction, and an optional `Z`, `±HH`, `±HHMM` or `±HH:MM`
/// offset. Offset timestamps yield their local wall-clock hour, not the
/// UTC hour. A bare date yields hour 0.
pub fn parse_hour(timestamp: &str) -> Option<u32> {
    let ts = timestamp.trim();
    let rest = strip_date(ts)?;
    if rest.is_empty() {
        return Some(0);
    }

    let rest = rest.strip_prefix(['T', 't', ' '])?;
    let (time, offset) = match rest.find(['+', '-', 'Z', 'z']) {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    if !valid_offset(offset) {
        return None;
    }
    time_hour(time)
}

/// Returns what follows a valid leading calendar date.
fn strip_date(ts: &str) -> Option<&str> {
    DATE_FORMATS.iter().find_map(|&(fmt, len)| {
        let head = ts.get(..len)?;
        NaiveDate::parse_from_str(head, fmt).ok()?;
        ts.get(len..)
    })
}

fn time_hour(time: &str) -> Option<u32> {
    if time.len() == 2 && time.bytes().all(|b| b.is_ascii_digit()) {
        return time.parse::<u32>().ok().filter(|h| *h < 24);
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())
        .map(|t| t.hour())
}

fn valid_offset(offset: &str) -> bool {
    match offset {
        "" | "Z" | "z" => true,
        // The first byte is an ASCII sign here.
        _ => offset.get(1..).and_then(time_hour).is_some(),
    }
}

fn sort_key(record: &HazardRecord) -> &str {
    record.timestamp.as_deref().unwrap_or("")
}

/// Sorts one site's records chronologically and assigns hour buckets.
///
/// The sort is stable, so records with identical timestamps keep their
/// arrival order.
pub fn normalize_site(records: &[HazardRecord]) -> Vec<NormalizedRecord<'_>> {
    let mut sorted: Vec<&HazardRecord> = records.iter().collect();
    sorted.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));

    sorted
        .into_iter()
        .enumerate()
        .map(|(position, record)| match parse_hour(sort_key(record)) {
            Some(hour) => NormalizedRecord {
                hour,
                hour_source: HourSource::Timestamp,
                record,
            },
            None => {
                warn!(
                    site = %record.site_id,
                    timestamp = ?record.timestamp,
                    position,
                    "unparseable timestamp, using record position as hour"
                );
                NormalizedRecord {
                    hour: position as u32,
                    hour_source: HourSource::Ordinal,
                    record,
                }
            }
        })
        .collect()
}
