use super::{get_global_config_dir, ConfigFile, SummaryConfig, WORKBOOK_CONFIG_FILE};
use crate::error::{ErrorCode, Result, SummaryError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolves [`SummaryConfig`] from its layers, lowest precedence first:
/// defaults, global `config.toml`, the workbook (or explicit) file, then
/// `TERRITORY_SUMMARY_*` environment variables.
pub struct ConfigLoader {
    global_dir: Option<PathBuf>,
    use_env: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            global_dir: get_global_config_dir(),
            use_env: true,
        }
    }

    /// Override where the global config is looked up (`None` disables it)
    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Skip environment variable overrides
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Load the effective configuration for `workbook`.
    ///
    /// An explicit `config_path` must exist; the implicit workbook and global
    /// files are optional.
    pub fn load(&self, workbook: &Path, config_path: Option<&Path>) -> Result<SummaryConfig> {
        let mut config = SummaryConfig::new();

        if let Some(global_dir) = &self.global_dir {
            let global_path = global_dir.join("config.toml");
            if global_path.exists() {
                config.merge_file(read_config_file(&global_path)?);
                info!("Loaded global configuration from {}", global_path.display());
            }
        }

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(SummaryError::config_with_code(
                        ErrorCode::CONFIG_NOT_FOUND,
                        "Configuration file not found",
                        Some(path.to_path_buf()),
                    ));
                }
                config.merge_file(read_config_file(path)?);
                info!("Loaded configuration from {}", path.display());
            }
            None => {
                let workbook_path = workbook.join(WORKBOOK_CONFIG_FILE);
                if workbook_path.exists() {
                    config.merge_file(read_config_file(&workbook_path)?);
                    info!("Loaded workbook configuration from {}", workbook_path.display());
                }
            }
        }

        if self.use_env {
            config.merge_env_vars();
        }

        debug!(?config, "Resolved configuration");
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        SummaryError::config("Failed to read configuration file")
            .with_path(path)
            .with_source(e)
    })?;
    toml::from_str(&content).map_err(|e| SummaryError::from(e).with_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader(global: Option<PathBuf>) -> ConfigLoader {
        ConfigLoader::new().with_global_dir(global).without_env()
    }

    #[test]
    fn test_defaults_without_files() {
        let workbook = TempDir::new().unwrap();
        let config = loader(None).load(workbook.path(), None).unwrap();
        assert_eq!(config, SummaryConfig::default());
    }

    #[test]
    fn test_workbook_file_overrides_global() {
        let global = TempDir::new().unwrap();
        fs::write(
            global.path().join("config.toml"),
            "source_sheet = \"Global\"\nstatus_glyphs = true\n",
        )
        .unwrap();

        let workbook = TempDir::new().unwrap();
        fs::write(
            workbook.path().join(WORKBOOK_CONFIG_FILE),
            "source_sheet = \"Local\"\n",
        )
        .unwrap();

        let config = loader(Some(global.path().to_path_buf()))
            .load(workbook.path(), None)
            .unwrap();
        assert_eq!(config.source_sheet, "Local");
        assert!(config.status_glyphs);
    }

    #[test]
    fn test_explicit_path_replaces_workbook_file() {
        let workbook = TempDir::new().unwrap();
        fs::write(
            workbook.path().join(WORKBOOK_CONFIG_FILE),
            "summary_sheet = \"Ignored\"\n",
        )
        .unwrap();
        let explicit = workbook.path().join("other.toml");
        fs::write(&explicit, "totals_sheet = \"Budget\"\n").unwrap();

        let config = loader(None).load(workbook.path(), Some(&explicit)).unwrap();
        assert_eq!(config.summary_sheet, "District Summary");
        assert_eq!(config.totals_sheet, "Budget");
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let workbook = TempDir::new().unwrap();
        let missing = workbook.path().join("missing.toml");
        let err = loader(None).load(workbook.path(), Some(&missing)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let workbook = TempDir::new().unwrap();
        fs::write(workbook.path().join(WORKBOOK_CONFIG_FILE), "source_sheet = [").unwrap();

        let err = loader(None).load(workbook.path(), None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_TOML);
        assert!(err.user_message().contains(WORKBOOK_CONFIG_FILE));
    }
}
