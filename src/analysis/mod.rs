/// Hazard timeline analysis for the per-site daily report.
///
/// Submodules, in pipeline order:
/// - `groupings`    — organizes flat ingest output into per-site batches.
/// - `normalize`    — chronological ordering and hour-of-day derivation.
/// - `extract`      — flattens records into hazard events and tallies them.
/// - `periods`      — reconstructs contiguous hazard periods.
/// - `measurements` — per-channel extrema and alert headlines.
/// - `site_summary` — composes the above into one `SiteSummary`.
/// - `daily_report` — summarizes every site and ranks them.

pub mod daily_report;
pub mod extract;
pub mod groupings;
pub mod measurements;
pub mod normalize;
pub mod periods;
pub mod site_summary;
