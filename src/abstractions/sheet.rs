//! Sheet access abstraction layer
//!
//! Provides trait-based abstraction over the workbook holding the source,
//! totals and summary sheets so the refresh logic can be tested without
//! touching the filesystem.

use crate::core::Table;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Trait for reading and writing whole sheets
pub trait SheetAdapter {
    /// Read every row of a sheet, or `None` when the sheet does not exist
    fn read_table(&self, sheet: &str) -> Result<Option<Table>>;

    /// Replace the full contents of a sheet, creating it if needed
    fn write_table(&self, sheet: &str, rows: &Table) -> Result<()>;

    /// Show a message to the user. Best effort; never fails.
    fn notify_user(&self, message: &str);
}

/// In-memory implementation of SheetAdapter for testing
#[derive(Default)]
pub struct MockSheetAdapter {
    /// Sheet contents keyed by sheet name
    pub sheets: Mutex<HashMap<String, Table>>,
    /// Messages passed to `notify_user`
    pub notifications: Mutex<Vec<String>>,
    /// Names of sheets written, in call order
    pub writes: Mutex<Vec<String>>,
}

impl MockSheetAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a sheet from string slices
    pub fn with_sheet(self, name: &str, rows: &[&[&str]]) -> Self {
        let table = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        self.sheets.lock().unwrap().insert(name.to_string(), table);
        self
    }

    pub fn sheet(&self, name: &str) -> Option<Table> {
        self.sheets.lock().unwrap().get(name).cloned()
    }

    pub fn get_notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn get_writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl SheetAdapter for MockSheetAdapter {
    fn read_table(&self, sheet: &str) -> Result<Option<Table>> {
        Ok(self.sheet(sheet))
    }

    fn write_table(&self, sheet: &str, rows: &Table) -> Result<()> {
        self.writes.lock().unwrap().push(sheet.to_string());
        self.sheets
            .lock()
            .unwrap()
            .insert(sheet.to_string(), rows.clone());
        Ok(())
    }

    fn notify_user(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }
}
