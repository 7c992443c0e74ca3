/// Report output.
///
/// Submodules:
/// - `text`   — human-readable rendering of a `DailyReport`.
/// - `output` — writes the JSON and text reports to the reports directory.

pub mod output;
pub mod text;
