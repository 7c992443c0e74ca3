/// Measurement extrema and alert collection across a site's records.
///
/// Record order does not matter for the extrema. A channel value counts
/// only when it is a finite, non-zero number; zero has always meant "no
/// reading" in the acquisition output. A channel with no counted value keeps
/// both extrema absent.
///
/// Alert headlines come from the `measurement` of each `weather_alert`
/// hazard and are deduplicated by exact match, keeping first-seen order.

use crate::model::{Channel, HazardRecord, MeasurementSummary};

/// Returns the value if it should count toward extrema.
pub fn usable_reading(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Folds one record into a running summary.
///
/// `alert_type` is the hazard type whose measurement text is collected
/// (normally `model::HAZARD_WEATHER_ALERT`).
pub fn accumulate(mut summary: MeasurementSummary, record: &HazardRecord, alert_type: &str) -> MeasurementSummary {
    for channel in Channel::ALL {
        if let Some(v) = usable_reading(record.measurements.value(channel)) {
            summary.channel_mut(channel).observe(v);
        }
    }

    for hazard in record.hazards.iter().filter(|h| h.hazard_type == alert_type) {
        if let Some(text) = hazard.measurement_text() {
            if !text.is_empty() && !summary.alerts_detected.contains(&text) {
                summary.alerts_detected.push(text);
            }
        }
    }

    summary
}

/// Summarizes measurements over all of a site's records.
pub fn aggregate<'a, I>(records: I, alert_type: &str) -> MeasurementSummary
where
    I: IntoIterator<Item = &'a HazardRecord>,
{
    records
        .into_iter()
        .fold(MeasurementSummary::default(), |summary, record| {
            accumulate(summary, record, alert_type)
        })
}
