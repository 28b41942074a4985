//! Edit trigger for CSV workbooks
//!
//! Watches the workbook directory and feeds the names of edited sheets into
//! [`on_source_changed`]. Edits are processed one at a time.

use super::{on_source_changed, RefreshOutcome};
use crate::abstractions::{CsvWorkbook, SheetAdapter};
use crate::config::SummaryConfig;
use crate::error::{Result, SummaryError};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Quiet period after an edit before the sheet is re-read
pub const SETTLE_DELAY: Duration = Duration::from_millis(250);

/// Sheets touched by a filesystem event
pub fn edited_sheets(event: &Event) -> Vec<String> {
    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
        return Vec::new();
    }
    event
        .paths
        .iter()
        .filter_map(|path| CsvWorkbook::sheet_for_path(path))
        .collect()
}

/// Run a single edit through the trigger, reporting failures to the user.
/// Source and schema failures are already alerted by the refresh itself.
pub fn handle_edit<A: SheetAdapter + ?Sized>(adapter: &A, config: &SummaryConfig, sheet: &str) {
    match on_source_changed(adapter, config, sheet) {
        Ok(RefreshOutcome::Written { districts }) => {
            info!("Refreshed '{}' ({} districts)", config.summary_sheet, districts);
        }
        Ok(RefreshOutcome::EmptySource) => {
            info!("Sheet '{}' has no data rows, summary left as is", sheet);
        }
        Ok(RefreshOutcome::Skipped) => {}
        Err(e @ (SummaryError::SourceNotFound { .. } | SummaryError::Schema { .. })) => {
            error!("Refresh failed: {}", e);
        }
        Err(e) => {
            error!("Refresh failed: {}", e);
            adapter.notify_user(&e.user_message());
        }
    }
}

/// Watch `workbook` until Ctrl-C, refreshing the summary whenever the
/// source sheet file is modified.
pub async fn watch_workbook(workbook: CsvWorkbook, config: SummaryConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<String>(64);

    let mut watcher =
        notify::recommended_watcher(move |res: std::result::Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    for sheet in edited_sheets(&event) {
                        let _ = tx.blocking_send(sheet);
                    }
                }
                Err(e) => warn!("Watch error: {}", e),
            }
        })?;

    watcher.watch(workbook.root(), RecursiveMode::NonRecursive)?;
    info!(
        "Watching {} for edits to '{}' (Ctrl-C to stop)",
        workbook.root().display(),
        config.source_sheet
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            received = rx.recv() => {
                let Some(first) = received else {
                    return Err(SummaryError::watch("Watcher stopped unexpectedly"));
                };

                tokio::time::sleep(SETTLE_DELAY).await;
                let mut pending = BTreeSet::from([first]);
                while let Ok(sheet) = rx.try_recv() {
                    pending.insert(sheet);
                }
                debug!(?pending, "Processing sheet edits");

                for sheet in pending {
                    handle_edit(&workbook, &config, &sheet);
                }
            }
            _ = &mut shutdown => {
                info!("Stopping watcher");
                return Ok(());
            }
        }
    }
}
