/// Ingestion of enhanced analysis files.
///
/// Submodules:
/// - `analysis_file` — locates `enhanced_analysis_<date>.json` and parses
///   its `detailed_analysis` records.
/// - `fixtures` (test only) — representative analysis payloads.

pub mod analysis_file;

#[cfg(test)]
pub(crate) mod fixtures;
