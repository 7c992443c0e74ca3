/// hazmon_service: per-site hazard timeline reconstruction and daily
/// aggregation for monitored detention centers.
///
/// # Module structure
///
/// ```text
/// hazmon_service
/// ├── model       — shared data types (HazardRecord, SiteSummary, DailyReport, HazmonError, …)
/// ├── config      — service configuration loader (hazmon.toml + environment)
/// ├── logging     — tracing subscriber setup
/// ├── ingest
/// │   ├── analysis_file — enhanced analysis file discovery + JSON parsing
/// │   └── fixtures (test only) — representative analysis payloads
/// ├── analysis
/// │   ├── groupings    — organizes flat records into per-site batches
/// │   ├── normalize    — chronological ordering, hour derivation
/// │   ├── extract      — hazard events, timeline entries, type tallies
/// │   ├── periods      — contiguous hazard period reconstruction
/// │   ├── measurements — per-channel extrema and alert headlines
/// │   ├── site_summary — one site's day as a SiteSummary
/// │   └── daily_report — multi-site ranking into a DailyReport
/// └── report
///     ├── text    — human-readable report rendering
///     └── output  — JSON + text report files
/// ```

/// Public modules
pub mod analysis;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod report;
