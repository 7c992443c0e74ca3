/// Test fixtures: representative enhanced analysis payloads.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parser and the summarizer. They reflect the
/// envelope written by the acquisition run:
///   daily_analysis/enhanced_analysis_<date>.json
///
/// Enhanced analysis shape:
///   detailed_analysis[]
///     .location            — site identifier (string)
///     .analysis_timestamp  — ISO 8601, may be missing or malformed
///     .hazard_analysis[]
///       .type              — hazard kind, e.g. "heat_index_risk"
///       .severity / .risk_level / .description
///       .measurement       — number for measurement hazards, headline for alerts
///     .raw_measurements    — heat_index_f, temperature_f, humidity_percent,
///                            precipitation_rate_in_hr (any may be null)
///
/// Note: the envelope carries other top-level keys (`date`, `summary`) that
/// the parser ignores.

/// Two centers. Krome has a heat event from 13:00 through 15:00 with a
/// repeated Excessive Heat Warning, records out of order. Otay Mesa has
/// measurements but no hazards.
#[cfg(test)]
pub(crate) fn fixture_two_center_day_json() -> &'static str {
    r#"{
      "date": "2025-07-14",
      "summary": { "total_records": 6 },
      "detailed_analysis": [
        {
          "location": "Krome",
          "analysis_timestamp": "2025-07-14T14:00:00",
          "hazard_analysis": [
            { "type": "heat_index_risk", "severity": "HIGH", "risk_level": "DANGER",
              "description": "Heat index 112.4F exceeds danger threshold", "measurement": 112.4 },
            { "type": "weather_alert", "severity": "SEVERE", "risk_level": null,
              "description": "Active NWS alert", "measurement": "Excessive Heat Warning" }
          ],
          "raw_measurements": { "heat_index_f": 112.4, "temperature_f": 97.1,
                                "humidity_percent": 55.0, "precipitation_rate_in_hr": null }
        },
        {
          "location": "Otay Mesa",
          "analysis_timestamp": "2025-07-14T14:00:00",
          "hazard_analysis": [],
          "raw_measurements": { "heat_index_f": null, "temperature_f": 78.0,
                                "humidity_percent": null, "precipitation_rate_in_hr": 0 }
        },
        {
          "location": "Krome",
          "analysis_timestamp": "2025-07-14T13:00:00",
          "hazard_analysis": [
            { "type": "heat_index_risk", "severity": "HIGH", "risk_level": "EXTREME CAUTION",
              "description": "Heat index 104.0F", "measurement": 104.0 },
            { "type": "weather_alert", "severity": "SEVERE",
              "description": "Active NWS alert", "measurement": "Excessive Heat Warning" }
          ],
          "raw_measurements": { "heat_index_f": 104.0, "temperature_f": 95.0,
                                "humidity_percent": 60.0 }
        },
        {
          "location": "Krome",
          "analysis_timestamp": "2025-07-14T16:00:00",
          "hazard_analysis": [],
          "raw_measurements": { "heat_index_f": 96.0, "temperature_f": 91.0 }
        },
        {
          "location": "Otay Mesa",
          "analysis_timestamp": "2025-07-14T15:00:00",
          "raw_measurements": { "temperature_f": 74.5 }
        },
        {
          "location": "Krome",
          "analysis_timestamp": "2025-07-14T15:00:00",
          "hazard_analysis": [
            { "type": "heat_index_risk", "severity": "MODERATE", "risk_level": "EXTREME CAUTION",
              "description": "Heat index 101.5F", "measurement": 101.5 }
          ],
          "raw_measurements": { "heat_index_f": 101.5, "temperature_f": 93.2 }
        }
      ]
    }"#
}

/// One center whose records have a missing and a malformed timestamp
/// around a valid 01:00 reading, all carrying a flood risk.
#[cfg(test)]
pub(crate) fn fixture_malformed_timestamps_json() -> &'static str {
    r#"{
      "detailed_analysis": [
        {
          "location": "Adelanto",
          "analysis_timestamp": "garbage",
          "hazard_analysis": [
            { "type": "precipitation_flood_risk", "severity": "MODERATE",
              "description": "Heavy rain", "measurement": 0.8 }
          ],
          "raw_measurements": { "precipitation_rate_in_hr": 0.8 }
        },
        {
          "location": "Adelanto",
          "analysis_timestamp": "2025-07-14T01:00:00",
          "hazard_analysis": [
            { "type": "precipitation_flood_risk", "severity": "HIGH",
              "description": "Heavy rain", "measurement": 1.3 }
          ],
          "raw_measurements": { "precipitation_rate_in_hr": 1.3 }
        },
        {
          "location": "Adelanto",
          "hazard_analysis": [
            { "type": "precipitation_flood_risk", "severity": "MODERATE",
              "description": "Heavy rain", "measurement": 0.5 }
          ],
          "raw_measurements": { "precipitation_rate_in_hr": 0.5 }
        }
      ]
    }"#
}

/// One center with a hazard missing its `type` and a record missing its
/// `location` between two usable records.
#[cfg(test)]
pub(crate) fn fixture_partially_malformed_json() -> &'static str {
    r#"{
      "detailed_analysis": [
        {
          "location": "Krome",
          "analysis_timestamp": "2025-07-14T13:00:00",
          "hazard_analysis": [
            { "severity": "HIGH", "description": "classifier dropped the type" },
            { "type": "weather_alert", "severity": "HIGH",
              "description": "NWS alert", "measurement": "Heat Advisory" }
          ],
          "raw_measurements": { "heat_index_f": 104.0 }
        },
        {
          "analysis_timestamp": "2025-07-14T14:00:00",
          "hazard_analysis": [
            { "type": "heat_index_risk", "severity": "HIGH", "measurement": 106.0 }
          ]
        },
        {
          "location": "Krome",
          "analysis_timestamp": "2025-07-14T15:00:00",
          "hazard_analysis": [
            { "type": "heat_index_risk", "severity": "HIGH", "measurement": 105.0 }
          ],
          "raw_measurements": { "heat_index_f": 105.0 }
        }
      ]
    }"#
}

/// Four centers for ranking: Bravo has three hazards, Alpha and Charlie
/// tie on one, Delta has none.
#[cfg(test)]
pub(crate) fn fixture_ranking_json() -> &'static str {
    r#"{
      "detailed_analysis": [
        { "location": "Alpha", "analysis_timestamp": "2025-07-14T10:00:00",
          "hazard_analysis": [ { "type": "heat_index_risk", "severity": "HIGH", "description": "" } ],
          "raw_measurements": {} },
        { "location": "Bravo", "analysis_timestamp": "2025-07-14T10:00:00",
          "hazard_analysis": [
            { "type": "heat_index_risk", "severity": "HIGH", "description": "" },
            { "type": "weather_alert", "severity": "SEVERE", "description": "", "measurement": "Heat Advisory" }
          ],
          "raw_measurements": {} },
        { "location": "Charlie", "analysis_timestamp": "2025-07-14T10:00:00",
          "hazard_analysis": [ { "type": "precipitation_flood_risk", "severity": "LOW", "description": "" } ],
          "raw_measurements": {} },
        { "location": "Delta", "analysis_timestamp": "2025-07-14T10:00:00",
          "hazard_analysis": [],
          "raw_measurements": {} },
        { "location": "Bravo", "analysis_timestamp": "2025-07-14T11:00:00",
          "hazard_analysis": [ { "type": "heat_index_risk", "severity": "HIGH", "description": "" } ],
          "raw_measurements": {} }
      ]
    }"#
}
