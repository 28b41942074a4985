//! Abstraction layers for external dependencies
//!
//! This module provides trait-based abstractions for the workbook the
//! summary is read from and written to, enabling dependency injection in tests.

pub mod csv_workbook;
pub mod sheet;

pub use csv_workbook::CsvWorkbook;
pub use sheet::{MockSheetAdapter, SheetAdapter};
