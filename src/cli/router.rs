//! Command routing and execution
//!
//! This module handles routing CLI commands to their respective implementations.

use crate::abstractions::CsvWorkbook;
use crate::app::AppConfig;
use crate::cli::args::{Commands, SheetArgs};
use crate::config::{ConfigLoader, SummaryConfig};
use crate::report::{export_timestamped, render};
use crate::trigger::{compute_summary, refresh_summary, watch_workbook, RefreshOutcome};
use anyhow::Result;
use tracing::debug;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Option<Commands>, app: &AppConfig) -> Result<()> {
    match command {
        Some(Commands::Run { sheets }) => run_refresh(app, &sheets),
        Some(Commands::Watch { sheets }) => {
            let config = resolve_config(app, &sheets)?;
            watch_workbook(CsvWorkbook::new(&app.workbook), config).await?;
            Ok(())
        }
        Some(Commands::Show { sheets, format }) => {
            let config = resolve_config(app, &sheets)?;
            let workbook = CsvWorkbook::new(&app.workbook);
            let rows = compute_summary(&workbook, &config)?.unwrap_or_default();
            print!("{}", render(&rows, format, config.status_glyphs)?);
            Ok(())
        }
        Some(Commands::Export {
            sheets,
            output_dir,
            format,
        }) => {
            let config = resolve_config(app, &sheets)?;
            let workbook = CsvWorkbook::new(&app.workbook);
            match compute_summary(&workbook, &config)? {
                Some(rows) => {
                    let path = export_timestamped(&rows, &output_dir, format, config.status_glyphs)?;
                    println!("Summary written to {}", path.display());
                }
                None => println!("No district data found"),
            }
            Ok(())
        }
        Some(Commands::Config { sheets }) => {
            let config = resolve_config(app, &sheets)?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
        None => run_refresh(app, &SheetArgs::default()),
    }
}

/// Load the layered configuration and apply command-line overrides
fn resolve_config(app: &AppConfig, sheets: &SheetArgs) -> Result<SummaryConfig> {
    let mut config = ConfigLoader::new().load(&app.workbook, app.config_path.as_deref())?;
    sheets.apply(&mut config);
    config.validate()?;
    debug!(?config, "Effective configuration");
    Ok(config)
}

fn run_refresh(app: &AppConfig, sheets: &SheetArgs) -> Result<()> {
    let config = resolve_config(app, sheets)?;
    let workbook = CsvWorkbook::new(&app.workbook);

    match refresh_summary(&workbook, &config)? {
        RefreshOutcome::Written { districts } => {
            println!(
                "✅ Summary updated: {} district(s) written to '{}'",
                districts, config.summary_sheet
            );
        }
        RefreshOutcome::EmptySource => {
            println!("No data rows in '{}', summary unchanged", config.source_sheet);
        }
        RefreshOutcome::Skipped => {}
    }
    Ok(())
}
