//! Application configuration
//!
//! This module handles process-wide settings that come from the command line
//! rather than from the workbook configuration.

use std::path::PathBuf;

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Workbook directory holding the sheet CSV files
    pub workbook: PathBuf,
    /// Explicit configuration file, if given
    pub config_path: Option<PathBuf>,
}

impl AppConfig {
    /// Set the workbook directory
    pub fn with_workbook(mut self, dir: PathBuf) -> Self {
        self.workbook = dir;
        self
    }

    /// Set an explicit configuration file
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Get the log level string based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            workbook: PathBuf::from("."),
            config_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_by_verbosity() {
        let config = AppConfig::default();
        assert_eq!(config.log_level(), "info");
        assert_eq!(AppConfig { verbose: 1, ..config.clone() }.log_level(), "debug");
        assert_eq!(AppConfig { verbose: 3, ..config }.log_level(), "trace");
    }

    #[test]
    fn test_builders() {
        let config = AppConfig::default()
            .with_workbook(PathBuf::from("/data/workbook"))
            .with_config_path(Some(PathBuf::from("/data/summary.toml")));
        assert_eq!(config.workbook, PathBuf::from("/data/workbook"));
        assert_eq!(config.config_path, Some(PathBuf::from("/data/summary.toml")));
    }
}
