use crate::error::{ErrorCode, Result, SummaryError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod loader;

pub use loader::ConfigLoader;

/// File name looked up inside the workbook directory
pub const WORKBOOK_CONFIG_FILE: &str = "territory-summary.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "TERRITORY_SUMMARY_";

/// Get the global directory holding `config.toml`
pub fn get_global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "territory-summary", "territory-summary")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Effective settings for one summary run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Sheet the territory rows are read from
    pub source_sheet: String,
    /// Sheet the district summary is written to; created if absent
    pub summary_sheet: String,
    /// Optional sheet of `name, total` override rows
    pub totals_sheet: String,
    /// When false the totals sheet is never read
    pub use_external_totals: bool,
    /// Prefix status labels with a presentation glyph
    pub status_glyphs: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            source_sheet: "Territories".to_string(),
            summary_sheet: "District Summary".to_string(),
            totals_sheet: "District Totals".to_string(),
            use_external_totals: true,
            status_glyphs: false,
        }
    }
}

/// One configuration layer as written in a TOML file; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub source_sheet: Option<String>,
    pub summary_sheet: Option<String>,
    pub totals_sheet: Option<String>,
    pub use_external_totals: Option<bool>,
    pub status_glyphs: Option<bool>,
}

impl SummaryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the keys set in a config file layer
    pub fn merge_file(&mut self, file: ConfigFile) {
        if let Some(sheet) = file.source_sheet {
            self.source_sheet = sheet;
        }
        if let Some(sheet) = file.summary_sheet {
            self.summary_sheet = sheet;
        }
        if let Some(sheet) = file.totals_sheet {
            self.totals_sheet = sheet;
        }
        if let Some(flag) = file.use_external_totals {
            self.use_external_totals = flag;
        }
        if let Some(flag) = file.status_glyphs {
            self.status_glyphs = flag;
        }
    }

    /// Apply `TERRITORY_SUMMARY_*` overrides from the process environment
    pub fn merge_env_vars(&mut self) {
        self.merge_env_with(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides read through `lookup`.
    /// Boolean values that fail to parse are left unchanged.
    pub fn merge_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(sheet) = var("SOURCE_SHEET") {
            self.source_sheet = sheet;
        }
        if let Some(sheet) = var("SUMMARY_SHEET") {
            self.summary_sheet = sheet;
        }
        if let Some(sheet) = var("TOTALS_SHEET") {
            self.totals_sheet = sheet;
        }
        if let Some(value) = var("USE_EXTERNAL_TOTALS").and_then(|v| parse_bool(&v)) {
            self.use_external_totals = value;
        }
        if let Some(value) = var("STATUS_GLYPHS").and_then(|v| parse_bool(&v)) {
            self.status_glyphs = value;
        }
    }

    /// Reject empty sheet names and a summary sheet that would overwrite an input
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("source_sheet", &self.source_sheet),
            ("summary_sheet", &self.summary_sheet),
            ("totals_sheet", &self.totals_sheet),
        ] {
            if value.trim().is_empty() {
                return Err(SummaryError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("{field} must not be empty"),
                    None,
                ));
            }
        }

        if self.summary_sheet == self.source_sheet {
            return Err(SummaryError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "summary_sheet must differ from source_sheet",
                None,
            ));
        }
        if self.use_external_totals && self.summary_sheet == self.totals_sheet {
            return Err(SummaryError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "summary_sheet must differ from totals_sheet",
                None,
            ));
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            SummaryError::config("Failed to render configuration").with_source(e)
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
