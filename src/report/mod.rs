//! Output formatting for the district summary
//!
//! This module turns summary rows into the sheet grid written back to the
//! workbook, and into human-readable, CSV and JSON renderings for the terminal
//! and for timestamped exports.

use crate::core::{SummaryRow, Table};
use crate::error::{Result, SummaryError};
use chrono::Local;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Header row of the summary sheet
pub const SUMMARY_HEADER: [&str; 6] = [
    "District",
    "Total Areas",
    "Closed/Off Plan",
    "Remaining",
    "Completion %",
    "Status",
];

/// File name prefix for timestamped exports
pub const EXPORT_PREFIX: &str = "territory_status_summary";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Table => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Unsupported format: {} (expected table, csv or json)",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Json => "json",
        })
    }
}

/// Pure function building the sheet grid: header row, then one row per district.
/// Completion % is written as a raw number.
pub fn summary_table(rows: &[SummaryRow], glyphs: bool) -> Table {
    let mut table: Table = Vec::with_capacity(rows.len() + 1);
    table.push(SUMMARY_HEADER.iter().map(|h| h.to_string()).collect());
    for row in rows {
        table.push(vec![
            row.district.clone(),
            row.total.to_string(),
            row.closed.to_string(),
            row.remaining.to_string(),
            row.completion_pct.to_string(),
            row.status.display_label(glyphs),
        ]);
    }
    table
}

/// Pure function to format the summary as aligned terminal columns
pub fn format_summary_human(rows: &[SummaryRow], glyphs: bool) -> String {
    let width = rows
        .iter()
        .map(|row| row.district.chars().count())
        .chain(std::iter::once(SUMMARY_HEADER[0].len()))
        .max()
        .unwrap_or(0);

    let mut output = format!(
        "{:<width$}  {:>11}  {:>15}  {:>9}  {:>12}  {}\n",
        SUMMARY_HEADER[0],
        SUMMARY_HEADER[1],
        SUMMARY_HEADER[2],
        SUMMARY_HEADER[3],
        SUMMARY_HEADER[4],
        SUMMARY_HEADER[5],
        width = width
    );
    output.push_str(&"=".repeat(width + 73));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{:<width$}  {:>11}  {:>15}  {:>9}  {:>11.2}%  {}\n",
            row.district,
            row.total,
            row.closed,
            row.remaining,
            row.completion_pct,
            row.status.display_label(glyphs),
            width = width
        ));
    }

    let total: u64 = rows.iter().map(|row| row.total).sum();
    let closed: u64 = rows.iter().map(|row| row.closed).sum();
    output.push_str(&"=".repeat(width + 73));
    output.push('\n');
    output.push_str(&format!(
        "Districts: {}  Areas: {}  Closed/Off Plan: {}\n",
        rows.len(),
        total,
        closed
    ));
    output
}

pub fn format_summary_csv(rows: &[SummaryRow], glyphs: bool) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in summary_table(rows, glyphs) {
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SummaryError::storage("Failed to finish CSV output").with_source(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| SummaryError::storage("CSV output was not UTF-8").with_source(e))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    districts: &'a [SummaryRow],
}

pub fn format_summary_json(rows: &[SummaryRow]) -> Result<String> {
    let report = JsonReport {
        generated_at: Local::now().to_rfc3339(),
        districts: rows,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render(rows: &[SummaryRow], format: OutputFormat, glyphs: bool) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_summary_human(rows, glyphs)),
        OutputFormat::Csv => format_summary_csv(rows, glyphs),
        OutputFormat::Json => format_summary_json(rows),
    }
}

/// Export file name for a given local timestamp string
pub fn export_file_name(timestamp: &str, format: OutputFormat) -> String {
    format!("{}_{}.{}", EXPORT_PREFIX, timestamp, format.extension())
}

/// Write the summary to `<output_dir>/territory_status_summary_<YYYYmmdd_HHMMSS>.<ext>`
pub fn export_timestamped(
    rows: &[SummaryRow],
    output_dir: &Path,
    format: OutputFormat,
    glyphs: bool,
) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let path = output_dir.join(export_file_name(&timestamp, format));

    fs::create_dir_all(output_dir).map_err(|e| SummaryError::from(e).with_path(output_dir))?;
    let content = render(rows, format, glyphs)?;
    fs::write(&path, content).map_err(|e| SummaryError::from(e).with_path(&path))?;

    info!("Summary exported to {}", path.display());
    Ok(path)
}
