//! Summary refresh entry points
//!
//! The imperative shell around [`crate::core::build_summary`]: reads sheets
//! through a [`SheetAdapter`], alerts the user on failures, and writes the
//! rendered summary back. [`refresh_summary`] is the manual entry point and
//! [`on_source_changed`] is the edit hook.

pub mod watch;

pub use watch::watch_workbook;

use crate::abstractions::SheetAdapter;
use crate::config::SummaryConfig;
use crate::core::{build_summary, SummaryRow};
use crate::error::{Result, SummaryError};
use crate::report::summary_table;
use tracing::{debug, info, trace, warn};

/// What a refresh did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Summary sheet replaced with this many district rows
    Written { districts: usize },
    /// Source has no data rows; nothing was written
    EmptySource,
    /// Edited sheet is not the source sheet
    Skipped,
}

/// Read the configured sheets and build the summary without writing it.
///
/// Returns `Ok(None)` when the source sheet has no data rows. A missing
/// source sheet or missing required columns are reported to the user
/// before the error is returned. An unreadable totals sheet falls back to
/// row counts.
pub fn compute_summary<A: SheetAdapter + ?Sized>(
    adapter: &A,
    config: &SummaryConfig,
) -> Result<Option<Vec<SummaryRow>>> {
    let Some(source) = adapter.read_table(&config.source_sheet)? else {
        return Err(alert(adapter, SummaryError::source_not_found(&config.source_sheet)));
    };

    let overrides = if config.use_external_totals {
        match adapter.read_table(&config.totals_sheet) {
            Ok(Some(totals)) => Some(totals),
            Ok(None) => {
                debug!("Totals sheet '{}' not found, using row counts", config.totals_sheet);
                None
            }
            Err(e) => {
                warn!(
                    "Totals sheet '{}' could not be read, using row counts: {}",
                    config.totals_sheet, e
                );
                None
            }
        }
    } else {
        None
    };

    let rows = build_summary(&source, overrides.as_ref()).map_err(|e| alert(adapter, e))?;

    if source.len() < 2 {
        info!("Sheet '{}' has no data rows", config.source_sheet);
        return Ok(None);
    }

    Ok(Some(rows))
}

/// Rebuild the summary sheet from the current source contents
pub fn refresh_summary<A: SheetAdapter + ?Sized>(
    adapter: &A,
    config: &SummaryConfig,
) -> Result<RefreshOutcome> {
    let Some(rows) = compute_summary(adapter, config)? else {
        return Ok(RefreshOutcome::EmptySource);
    };

    let table = summary_table(&rows, config.status_glyphs);
    adapter.write_table(&config.summary_sheet, &table)?;

    info!(
        "Wrote {} district(s) to sheet '{}'",
        rows.len(),
        config.summary_sheet
    );
    Ok(RefreshOutcome::Written {
        districts: rows.len(),
    })
}

/// Edit hook: refresh only when the edited sheet is the source sheet
pub fn on_source_changed<A: SheetAdapter + ?Sized>(
    adapter: &A,
    config: &SummaryConfig,
    edited_sheet: &str,
) -> Result<RefreshOutcome> {
    if edited_sheet != config.source_sheet {
        trace!("Ignoring edit to sheet '{}'", edited_sheet);
        return Ok(RefreshOutcome::Skipped);
    }
    debug!("Source sheet '{}' changed, refreshing", edited_sheet);
    refresh_summary(adapter, config)
}

fn alert<A: SheetAdapter + ?Sized>(adapter: &A, error: SummaryError) -> SummaryError {
    adapter.notify_user(&error.user_message());
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstractions::MockSheetAdapter;

    fn source_rows() -> &'static [&'static [&'static str]] {
        &[
            &["District", "Status"],
            &["North", "Closed"],
            &["North", "Open"],
            &["South", "off-plan"],
        ]
    }

    #[test]
    fn test_refresh_writes_summary_sheet() {
        let adapter = MockSheetAdapter::new().with_sheet("Territories", source_rows());
        let outcome = refresh_summary(&adapter, &SummaryConfig::default()).unwrap();

        assert_eq!(outcome, RefreshOutcome::Written { districts: 2 });
        let written = adapter.sheet("District Summary").unwrap();
        assert_eq!(written[0][0], "District");
        assert_eq!(written[1], vec!["North", "2", "1", "1", "50", "In Progress"]);
        assert_eq!(written[2], vec!["South", "1", "1", "0", "100", "Complete"]);
        assert!(adapter.get_notifications().is_empty());
    }

    #[test]
    fn test_refresh_applies_totals_sheet() {
        let adapter = MockSheetAdapter::new()
            .with_sheet("Territories", source_rows())
            .with_sheet("District Totals", &[&["name", "total"], &["North", "10"]]);
        refresh_summary(&adapter, &SummaryConfig::default()).unwrap();

        let written = adapter.sheet("District Summary").unwrap();
        assert_eq!(written[1], vec!["North", "10", "1", "9", "10", "In Progress"]);
    }

    #[test]
    fn test_refresh_skips_totals_when_disabled() {
        let adapter = MockSheetAdapter::new()
            .with_sheet("Territories", source_rows())
            .with_sheet("District Totals", &[&["name", "total"], &["North", "10"]]);
        let config = SummaryConfig {
            use_external_totals: false,
            ..SummaryConfig::default()
        };
        refresh_summary(&adapter, &config).unwrap();

        let written = adapter.sheet("District Summary").unwrap();
        assert_eq!(written[1][1], "2");
    }

    #[test]
    fn test_missing_source_alerts_and_writes_nothing() {
        let adapter = MockSheetAdapter::new();
        let err = refresh_summary(&adapter, &SummaryConfig::default()).unwrap_err();

        assert!(matches!(err, SummaryError::SourceNotFound { .. }));
        assert_eq!(adapter.get_notifications().len(), 1);
        assert!(adapter.get_notifications()[0].contains("Territories"));
        assert!(adapter.get_writes().is_empty());
    }

    #[test]
    fn test_schema_error_alerts_and_writes_nothing() {
        let adapter = MockSheetAdapter::new()
            .with_sheet("Territories", &[&["Area", "Status"], &["North", "Closed"]]);
        let err = refresh_summary(&adapter, &SummaryConfig::default()).unwrap_err();

        assert!(matches!(err, SummaryError::Schema { .. }));
        assert_eq!(adapter.get_notifications().len(), 1);
        assert!(adapter.get_writes().is_empty());
    }

    #[test]
    fn test_empty_source_is_silent_noop() {
        let adapter = MockSheetAdapter::new()
            .with_sheet("Territories", &[&["District", "Status"]])
            .with_sheet("District Summary", &[&["old"]]);
        let outcome = refresh_summary(&adapter, &SummaryConfig::default()).unwrap();

        assert_eq!(outcome, RefreshOutcome::EmptySource);
        assert!(adapter.get_writes().is_empty());
        assert!(adapter.get_notifications().is_empty());
        assert_eq!(adapter.sheet("District Summary").unwrap(), vec![vec!["old"]]);
    }

    #[test]
    fn test_on_source_changed_filters_by_sheet() {
        let adapter = MockSheetAdapter::new().with_sheet("Territories", source_rows());
        let config = SummaryConfig::default();

        assert_eq!(
            on_source_changed(&adapter, &config, "District Totals").unwrap(),
            RefreshOutcome::Skipped
        );
        assert!(adapter.get_writes().is_empty());

        assert_eq!(
            on_source_changed(&adapter, &config, "Territories").unwrap(),
            RefreshOutcome::Written { districts: 2 }
        );
        assert_eq!(adapter.get_writes(), vec!["District Summary"]);
    }

    #[test]
    fn test_refresh_is_repeatable() {
        let adapter = MockSheetAdapter::new().with_sheet("Territories", source_rows());
        let config = SummaryConfig::default();

        refresh_summary(&adapter, &config).unwrap();
        let first = adapter.sheet("District Summary").unwrap();
        refresh_summary(&adapter, &config).unwrap();
        let second = adapter.sheet("District Summary").unwrap();

        assert_eq!(first, second);
    }
}
