//! Workbook backed by a directory of CSV files
//!
//! Each sheet `<name>` lives in `<root>/<name>.csv`. Rows are read without
//! header handling so row 0 stays the header, exactly as a sheet grid would
//! hand it over.

use super::sheet::SheetAdapter;
use crate::core::Table;
use crate::error::{ErrorCode, Result, SummaryError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub const SHEET_EXTENSION: &str = "csv";

pub struct CsvWorkbook {
    root: PathBuf,
}

impl CsvWorkbook {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `sheet`; names that would escape the workbook are rejected
    pub fn sheet_path(&self, sheet: &str) -> Result<PathBuf> {
        if sheet.is_empty() || sheet.contains(['/', '\\']) || sheet == "." || sheet == ".." {
            return Err(SummaryError::storage_with_code(
                ErrorCode::STORAGE_GENERIC,
                format!("Invalid sheet name '{}'", sheet),
                None,
            ));
        }
        Ok(self.root.join(format!("{sheet}.{SHEET_EXTENSION}")))
    }

    /// Sheet name for a file inside the workbook, if it is a sheet file
    pub fn sheet_for_path(path: &Path) -> Option<String> {
        if path.extension()? != SHEET_EXTENSION {
            return None;
        }
        path.file_stem()?.to_str().map(str::to_string)
    }
}

impl SheetAdapter for CsvWorkbook {
    fn read_table(&self, sheet: &str) -> Result<Option<Table>> {
        let path = self.sheet_path(sheet)?;
        if !path.is_file() {
            debug!("Sheet '{}' not found at {}", sheet, path.display());
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| SummaryError::from(e).with_path(&path))?;

        let mut rows: Table = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| SummaryError::from(e).with_path(&path))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!("Read {} row(s) from sheet '{}'", rows.len(), sheet);
        Ok(Some(rows))
    }

    fn write_table(&self, sheet: &str, rows: &Table) -> Result<()> {
        let path = self.sheet_path(sheet)?;
        fs::create_dir_all(&self.root)
            .map_err(|e| SummaryError::from(e).with_path(&self.root))?;

        // Write beside the target, then swap it in so readers never see a partial sheet
        let mut temp_file = NamedTempFile::new_in(&self.root)
            .map_err(|e| SummaryError::from(e).with_path(&self.root))?;
        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(&mut temp_file);
            for row in rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        temp_file.as_file_mut().flush()?;

        temp_file
            .persist(&path)
            .map_err(|e| SummaryError::from(e.error).with_path(&path))?;

        debug!("Wrote {} row(s) to sheet '{}'", rows.len(), sheet);
        Ok(())
    }

    fn notify_user(&self, message: &str) {
        warn!("{}", message);
        eprintln!("⚠️  {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_sheet_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let workbook = CsvWorkbook::new(dir.path());
        assert!(workbook.read_table("Territories").unwrap().is_none());
    }

    #[test]
    fn test_read_keeps_header_row_and_ragged_rows() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Territories.csv"),
            "District,Status\nNorth,Closed\nSouth\n\"East, Upper\",off plan\n",
        )
        .unwrap();

        let rows = CsvWorkbook::new(dir.path())
            .read_table("Territories")
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["District", "Status"]);
        assert_eq!(rows[2], vec!["South"]);
        assert_eq!(rows[3], vec!["East, Upper", "off plan"]);
    }

    #[test]
    fn test_write_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let workbook = CsvWorkbook::new(dir.path());

        let first = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["1".to_string(), "2".to_string()],
            vec!["3".to_string(), "4".to_string()],
        ];
        workbook.write_table("Summary", &first).unwrap();

        let second = vec![vec!["only".to_string()]];
        workbook.write_table("Summary", &second).unwrap();

        let content = fs::read_to_string(dir.path().join("Summary.csv")).unwrap();
        assert_eq!(content, "only\n");
        assert_eq!(workbook.read_table("Summary").unwrap().unwrap(), second);
    }

    #[test]
    fn test_write_creates_missing_workbook_dir() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested");
        let workbook = CsvWorkbook::new(&root);
        workbook
            .write_table("Summary", &vec![vec!["x".to_string()]])
            .unwrap();
        assert!(root.join("Summary.csv").is_file());
    }

    #[test]
    fn test_sheet_names_cannot_escape_root() {
        let workbook = CsvWorkbook::new("/tmp/workbook");
        assert!(workbook.sheet_path("../etc/passwd").is_err());
        assert!(workbook.sheet_path("").is_err());
        assert_eq!(
            workbook.sheet_path("District Summary").unwrap(),
            PathBuf::from("/tmp/workbook/District Summary.csv")
        );
    }

    #[test]
    fn test_sheet_for_path() {
        assert_eq!(
            CsvWorkbook::sheet_for_path(Path::new("/w/Territories.csv")),
            Some("Territories".to_string())
        );
        assert_eq!(CsvWorkbook::sheet_for_path(Path::new("/w/notes.txt")), None);
        assert_eq!(CsvWorkbook::sheet_for_path(Path::new("/w/README")), None);
    }
}
