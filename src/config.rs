/// Service configuration loader - parses hazmon.toml
///
/// Separates file locations, report naming and analysis options from code,
/// so a deployment can point at a different analysis directory or alert
/// hazard type without recompiling.
///
/// Every key is optional. Environment variables (read after loading `.env`)
/// override the file:
///   HAZMON_CONFIG      — path to the TOML file (default: hazmon.toml)
///   HAZMON_INPUT_DIR   — searched before the configured input directories
///   HAZMON_REPORTS_DIR — directory the reports are written to
///   HAZMON_LOG         — tracing filter, see `logging::init`

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{HazmonError, HAZARD_WEATHER_ALERT};

pub const DEFAULT_CONFIG_PATH: &str = "hazmon.toml";

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HazmonConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

/// Where enhanced analysis files are looked up
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directories searched in order for `<file_prefix><date>.json`
    pub search_dirs: Vec<PathBuf>,
    pub file_prefix: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            search_dirs: vec![
                PathBuf::from("daily_analysis"),
                PathBuf::from("../daily_analysis"),
                PathBuf::from("."),
            ],
            file_prefix: "enhanced_analysis_".to_string(),
        }
    }
}

/// Where and under which names reports are written
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub reports_dir: PathBuf,
    pub json_prefix: String,
    pub text_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("center_reports"),
            json_prefix: "center_analysis_".to_string(),
            text_prefix: "center_report_".to_string(),
        }
    }
}

/// Analysis options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Hazard type whose measurement text is collected as alert headlines
    pub alert_hazard_type: String,
    /// Threads used for per-site summarization (1 = serial)
    pub parallel_workers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alert_hazard_type: HAZARD_WEATHER_ALERT.to_string(),
            parallel_workers: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when HAZMON_LOG / RUST_LOG are unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl HazmonConfig {
    fn validate(self) -> Result<Self, HazmonError> {
        if self.analysis.parallel_workers == 0 {
            return Err(HazmonError::Config(
                "analysis.parallel_workers must be at least 1".to_string(),
            ));
        }
        if self.analysis.alert_hazard_type.trim().is_empty() {
            return Err(HazmonError::Config(
                "analysis.alert_hazard_type must not be empty".to_string(),
            ));
        }
        if self.input.search_dirs.is_empty() {
            return Err(HazmonError::Config(
                "input.search_dirs must list at least one directory".to_string(),
            ));
        }
        Ok(self)
    }

    /// Applies HAZMON_INPUT_DIR / HAZMON_REPORTS_DIR from `lookup`.
    pub fn apply_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("HAZMON_INPUT_DIR").filter(|d| !d.is_empty()) {
            self.input.search_dirs.insert(0, PathBuf::from(dir));
        }
        if let Some(dir) = lookup("HAZMON_REPORTS_DIR").filter(|d| !d.is_empty()) {
            self.output.reports_dir = PathBuf::from(dir);
        }
        self
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<HazmonConfig, HazmonError> {
    let config: HazmonConfig =
        toml::from_str(contents).map_err(|e| HazmonError::Config(e.to_string()))?;
    config.validate()
}

/// Loads configuration from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HazmonConfig, HazmonError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| HazmonError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents)
}

/// Loads configuration the way the binaries do.
///
/// Reads `.env` if present, then `explicit` or `$HAZMON_CONFIG` or
/// `hazmon.toml`. A missing default file yields the defaults; a missing
/// explicitly named file is an error. Environment overrides are applied
/// last.
pub fn load_config_default(explicit: Option<&Path>) -> Result<HazmonConfig, HazmonError> {
    dotenv::dotenv().ok();

    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var("HAZMON_CONFIG").ok().map(PathBuf::from));

    let config = match named {
        Some(path) => load_config(&path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)?,
        None => HazmonConfig::default(),
    };

    Ok(config.apply_env_overrides(|key| env::var(key).ok()))
}
