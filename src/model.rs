/// HazardRecord, HazardObservation, SiteSummary, DailyReport, HazmonError
/// core data structures and error handling
///
/// Core data types for the site hazard timeline service.
///
/// This module defines the shared domain model imported by all other modules.
/// Input types deserialize from the acquisition collaborator's enhanced
/// analysis format; output types serialize to the center report format.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::warn;

// ---------------------------------------------------------------------------
// Hazard kinds
// ---------------------------------------------------------------------------

/// Heat index risk, classified from the `heat_index_f` channel.
pub const HAZARD_HEAT_INDEX: &str = "heat_index_risk";

/// Flood risk, classified from the `precipitation_rate_in_hr` channel.
pub const HAZARD_FLOOD: &str = "precipitation_flood_risk";

/// Official weather-service alert. `measurement` carries the headline.
pub const HAZARD_WEATHER_ALERT: &str = "weather_alert";

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// One hourly, hazard-annotated observation for a single site.
///
/// Corresponds to one entry of the `detailed_analysis` array in an
/// `enhanced_analysis_<date>.json` file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HazardRecord {
    #[serde(rename = "location")]
    pub site_id: String,
    /// ISO 8601, e.g. "2025-07-14T13:00:00". May be absent or malformed.
    #[serde(rename = "analysis_timestamp", default, deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
    /// Entries that fail to deserialize are skipped with a warning.
    #[serde(rename = "hazard_analysis", default, deserialize_with = "lenient_hazards")]
    pub hazards: Vec<HazardObservation>,
    #[serde(rename = "raw_measurements", default, deserialize_with = "null_as_default")]
    pub measurements: RawMeasurements,
}

/// A single pre-classified hazard inside a record.
///
/// `severity`, `risk_level` and `description` are opaque here and passed
/// through to the timeline untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HazardObservation {
    #[serde(rename = "type")]
    pub hazard_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub risk_level: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Numeric reading for measurement hazards, headline text for alerts.
    #[serde(default)]
    pub measurement: Option<serde_json::Value>,
}

impl HazardObservation {
    /// The measurement payload as text, if it is a string or a number.
    pub fn measurement_text(&self) -> Option<String> {
        match self.measurement.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Numeric measurement channels reported with each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    HeatIndex,
    Temperature,
    Humidity,
    Precipitation,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::HeatIndex,
        Channel::Temperature,
        Channel::Humidity,
        Channel::Precipitation,
    ];

    /// Key of this channel in `raw_measurements`.
    pub fn key(&self) -> &'static str {
        match self {
            Channel::HeatIndex => "heat_index_f",
            Channel::Temperature => "temperature_f",
            Channel::Humidity => "humidity_percent",
            Channel::Precipitation => "precipitation_rate_in_hr",
        }
    }
}

/// The `raw_measurements` mapping of a record.
///
/// Known channels are typed; a non-numeric value in a known channel
/// deserializes as `None` rather than rejecting the record. Any other keys
/// are kept in `other` and ignored by the engine.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawMeasurements {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub heat_index_f: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature_f: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub humidity_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precipitation_rate_in_hr: Option<f64>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl RawMeasurements {
    pub fn value(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::HeatIndex => self.heat_index_f,
            Channel::Temperature => self.temperature_f,
            Channel::Humidity => self.humidity_percent,
            Channel::Precipitation => self.precipitation_rate_in_hr,
        }
    }
}

// ---------------------------------------------------------------------------
// Ordered map
// ---------------------------------------------------------------------------

/// String-keyed map that iterates and serializes in insertion order.
///
/// Hazard types are open-ended strings supplied by upstream classifiers,
/// and report consumers rely on first-seen ordering, so neither an enum
/// nor a `HashMap` fits.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    /// Returns the value for `key`, appending `make()` if it is new.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let i = match self.index.get(key).copied() {
            Some(i) => i,
            None => {
                self.entries.push((key.to_string(), make()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    /// Inserts or replaces. A replaced key keeps its original position.
    pub fn insert(&mut self, key: String, value: V) {
        match self.index.get(&key).copied() {
            Some(i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Derived types
// ---------------------------------------------------------------------------

/// A maximal run of consecutive records in which one hazard type was present.
///
/// `duration == end_hour - start_hour + 1`, computed signed. When an
/// ordinal fallback hour follows a parsed one the end can precede the
/// start and the duration is zero or negative; `is_backwards` flags that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HazardPeriod {
    pub start_hour: u32,
    pub end_hour: u32,
    pub duration: i64,
}

impl HazardPeriod {
    pub fn opened_at(hour: u32) -> Self {
        HazardPeriod {
            start_hour: hour,
            end_hour: hour,
            duration: 1,
        }
    }

    /// Moves the end of the period to `hour`.
    pub fn extend_to(&mut self, hour: u32) {
        self.end_hour = hour;
        self.duration = i64::from(hour) - i64::from(self.start_hour) + 1;
    }

    pub fn is_backwards(&self) -> bool {
        self.end_hour < self.start_hour
    }
}

/// One hazard occurrence on a site's chronological timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub hour: u32,
    #[serde(rename = "type")]
    pub hazard_type: String,
    pub severity: String,
    pub description: String,
    pub measurement: Option<serde_json::Value>,
    pub risk_level: Option<String>,
    /// Raw timestamp of the source record, empty when it had none.
    pub timestamp: String,
}

/// Running minimum and maximum of one channel. Both absent until a value
/// is observed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extrema {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Extrema {
    pub fn observe(&mut self, value: f64) {
        if self.max.is_none_or(|m| value > m) {
            self.max = Some(value);
        }
        if self.min.is_none_or(|m| value < m) {
            self.min = Some(value);
        }
    }
}

/// Day-long measurement extrema and deduplicated alerts for one site.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementSummary {
    pub heat_index: Extrema,
    pub temperature: Extrema,
    pub humidity: Extrema,
    pub precipitation: Extrema,
    pub alerts_detected: Vec<String>,
}

impl MeasurementSummary {
    pub fn channel(&self, channel: Channel) -> &Extrema {
        match channel {
            Channel::HeatIndex => &self.heat_index,
            Channel::Temperature => &self.temperature,
            Channel::Humidity => &self.humidity,
            Channel::Precipitation => &self.precipitation,
        }
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut Extrema {
        match channel {
            Channel::HeatIndex => &mut self.heat_index,
            Channel::Temperature => &mut self.temperature,
            Channel::Humidity => &mut self.humidity,
            Channel::Precipitation => &mut self.precipitation,
        }
    }
}

// The report format only carries maxima for humidity and precipitation.
impl Serialize for MeasurementSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("MeasurementSummary", 7)?;
        s.serialize_field("max_heat_index", &self.heat_index.max)?;
        s.serialize_field("min_heat_index", &self.heat_index.min)?;
        s.serialize_field("max_temperature", &self.temperature.max)?;
        s.serialize_field("min_temperature", &self.temperature.min)?;
        s.serialize_field("max_humidity", &self.humidity.max)?;
        s.serialize_field("max_precipitation", &self.precipitation.max)?;
        s.serialize_field("alerts_detected", &self.alerts_detected)?;
        s.end()
    }
}

/// Everything known about one site's day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    pub total_records: usize,
    pub total_hazards: usize,
    pub unique_hazard_types: usize,
    pub hazard_summary: OrderedMap<usize>,
    /// Serialized as `[type, count]`, or `null` when the site had no hazards.
    pub most_frequent_hazard: Option<(String, usize)>,
    pub hazard_timeline: Vec<TimelineEntry>,
    pub hazard_periods: OrderedMap<Vec<HazardPeriod>>,
    pub measurements: MeasurementSummary,
    pub hours_covered: usize,
}

/// The multi-site report for one reporting date.
///
/// `centers` iterates in presentation order: descending `total_hazards`,
/// ties in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub date: String,
    pub analysis_timestamp: String,
    pub total_centers: usize,
    pub centers: OrderedMap<SiteSummary>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised around the engine: configuration, file discovery, parsing
/// and report writing. The engine itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum HazmonError {
    /// No enhanced analysis file for the date in any search directory.
    #[error("No enhanced analysis file for {date} (searched: {})", display_paths(.searched))]
    AnalysisFileNotFound { date: String, searched: Vec<PathBuf> },
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Lenient deserializers
// ---------------------------------------------------------------------------

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes each hazard on its own and drops the ones that fail,
/// such as an entry without `type`. `null` is an empty list.
fn lenient_hazards<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<HazardObservation>, D::Error> {
    let entries = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(hazard) => Some(hazard),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed hazard entry");
                None
            }
        })
        .collect())
}

/// Accepts a number or a numeric string; anything else becomes `None`.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts a string or a scalar rendered as text; `null` and containers
/// become `None`.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
