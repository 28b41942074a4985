//! District summary aggregation
//!
//! Rolls territory rows up into one [`SummaryRow`] per district. Everything
//! here is pure: the same tables always produce the same summary, and the
//! per-district stats map is rebuilt from scratch on every call.

use super::status::{is_closed_status, DistrictStatus};
use super::Table;
use crate::error::{Result, SummaryError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Header of the column holding the district name
pub const DISTRICT_COLUMN: &str = "District";
/// Header of the column holding the territory status
pub const STATUS_COLUMN: &str = "Status";

/// Running counts for one district
///
/// `closed <= total` is not guaranteed: an override total may be lower than
/// the number of closed rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupStats {
    pub total: u64,
    pub closed: u64,
}

impl GroupStats {
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.closed)
    }

    pub fn completion_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.closed as f64 / self.total as f64 * 100.0
        }
    }
}

/// One line of the district summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub district: String,
    pub total: u64,
    pub closed: u64,
    pub remaining: u64,
    pub completion_pct: f64,
    pub status: DistrictStatus,
}

impl SummaryRow {
    pub fn from_stats(district: impl Into<String>, stats: GroupStats) -> Self {
        let remaining = stats.remaining();
        let completion_pct = stats.completion_pct();
        Self {
            district: district.into(),
            total: stats.total,
            closed: stats.closed,
            remaining,
            completion_pct,
            status: DistrictStatus::classify(stats.total, stats.closed, remaining, completion_pct),
        }
    }
}

/// Positions of the required columns in the source header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceColumns {
    district: usize,
    status: usize,
}

impl SourceColumns {
    fn locate(header: &[String]) -> Result<Self> {
        let find = |name: &str| header.iter().position(|cell| cell == name);
        match (find(DISTRICT_COLUMN), find(STATUS_COLUMN)) {
            (Some(district), Some(status)) => Ok(Self { district, status }),
            (district, status) => {
                let mut missing = Vec::new();
                if district.is_none() {
                    missing.push(DISTRICT_COLUMN.to_string());
                }
                if status.is_none() {
                    missing.push(STATUS_COLUMN.to_string());
                }
                Err(SummaryError::schema(missing))
            }
        }
    }
}

/// Trimmed cell value; cells past the end of a short row read as empty
fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|value| value.trim()).unwrap_or("")
}

/// Parse an override total. Anything that is not a finite, non-negative
/// number is rejected; fractional totals are rounded to the nearest count.
pub fn parse_total(value: &str) -> Option<u64> {
    let parsed: f64 = value.trim().parse().ok()?;
    if parsed.is_finite() && parsed >= 0.0 {
        Some(parsed.round() as u64)
    } else {
        None
    }
}

/// Count total and closed territories per district from the source table
fn tally_source(rows: &[Vec<String>], columns: SourceColumns) -> BTreeMap<String, GroupStats> {
    let mut stats: BTreeMap<String, GroupStats> = BTreeMap::new();

    for row in rows {
        let district = cell(row, columns.district);
        if district.is_empty() {
            continue;
        }
        let entry = stats.entry(district.to_string()).or_default();
        entry.total += 1;
        if is_closed_status(cell(row, columns.status)) {
            entry.closed += 1;
        }
    }

    stats
}

/// Overwrite district totals from an override table (header row skipped)
fn apply_overrides(stats: &mut BTreeMap<String, GroupStats>, overrides: &[Vec<String>]) {
    for row in overrides.iter().skip(1) {
        let name = cell(row, 0);
        if name.is_empty() {
            continue;
        }
        let entry = stats.entry(name.to_string()).or_default();
        let raw_total = cell(row, 1);
        match parse_total(raw_total) {
            Some(total) => {
                trace!(district = name, total, "Applying override total");
                entry.total = total;
            }
            None => debug!(
                district = name,
                value = raw_total,
                "Ignoring non-numeric override total"
            ),
        }
    }
}

/// Build the district summary from the source table and optional overrides.
///
/// Row 0 of `source` is the header and must contain `District` and `Status`.
/// A table with no rows at all, or only a header, yields an empty summary.
pub fn build_summary(source: &Table, overrides: Option<&Table>) -> Result<Vec<SummaryRow>> {
    let Some((header, data)) = source.split_first() else {
        return Ok(Vec::new());
    };

    let columns = SourceColumns::locate(header)?;
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut stats = tally_source(data, columns);
    if let Some(overrides) = overrides {
        apply_overrides(&mut stats, overrides);
    }

    debug!(
        rows = data.len(),
        districts = stats.len(),
        "Aggregated territory rows"
    );

    Ok(stats
        .into_iter()
        .map(|(district, stats)| SummaryRow::from_stats(district, stats))
        .collect())
}
