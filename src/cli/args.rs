//! CLI argument structures
//!
//! This module defines all command-line interface structures used by territory-summary.
//! It includes the main CLI structure and all subcommand definitions.

use crate::config::SummaryConfig;
use crate::report::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Roll territory status rows up into a per-district summary
#[derive(Parser)]
#[command(name = "territory-summary")]
#[command(about = "territory-summary - Summarize territory completion by district", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Workbook directory containing one CSV file per sheet
    #[arg(short = 'w', long, global = true, default_value = ".")]
    pub workbook: PathBuf,

    /// Configuration file (defaults to <workbook>/territory-summary.toml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Per-invocation overrides for the workbook configuration
#[derive(Debug, Clone, Default, Args)]
pub struct SheetArgs {
    /// Sheet holding the territory rows
    #[arg(long, value_name = "SHEET")]
    pub source_sheet: Option<String>,

    /// Sheet the summary is written to
    #[arg(long, value_name = "SHEET")]
    pub summary_sheet: Option<String>,

    /// Sheet holding `name, total` override rows
    #[arg(long, value_name = "SHEET")]
    pub totals_sheet: Option<String>,

    /// Ignore the totals sheet and count rows only
    #[arg(long)]
    pub no_external_totals: bool,

    /// Prefix status labels with a glyph
    #[arg(long)]
    pub glyphs: bool,
}

impl SheetArgs {
    /// Apply the flags that were given on top of `config`
    pub fn apply(&self, config: &mut SummaryConfig) {
        if let Some(sheet) = &self.source_sheet {
            config.source_sheet = sheet.clone();
        }
        if let Some(sheet) = &self.summary_sheet {
            config.summary_sheet = sheet.clone();
        }
        if let Some(sheet) = &self.totals_sheet {
            config.totals_sheet = sheet.clone();
        }
        if self.no_external_totals {
            config.use_external_totals = false;
        }
        if self.glyphs {
            config.status_glyphs = true;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the summary sheet from the source sheet (default command)
    #[command(name = "run")]
    Run {
        #[command(flatten)]
        sheets: SheetArgs,
    },

    /// Watch the workbook and rebuild the summary whenever the source sheet changes
    #[command(name = "watch")]
    Watch {
        #[command(flatten)]
        sheets: SheetArgs,
    },

    /// Print the summary without writing it to the workbook
    #[command(name = "show")]
    Show {
        #[command(flatten)]
        sheets: SheetArgs,

        /// Output format (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Write a timestamped copy of the summary to a directory
    #[command(name = "export")]
    Export {
        #[command(flatten)]
        sheets: SheetArgs,

        /// Directory the export file is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Output format (table, csv, json)
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },

    /// Print the effective configuration
    #[command(name = "config")]
    Config {
        #[command(flatten)]
        sheets: SheetArgs,
    },
}
