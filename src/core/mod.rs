//! Core business logic module with pure functions
//!
//! This module contains pure functions that implement the summary logic without any I/O.
//! Following the "functional core, imperative shell" pattern, all functions here:
//! - Take tables in and return summary rows out
//! - Have no side effects
//! - Don't touch the workbook, the terminal, or the environment
//! - Are easily testable without mocks

pub mod status;
pub mod summary;

pub use status::{is_closed_status, DistrictStatus};
pub use summary::{build_summary, parse_total, GroupStats, SummaryRow};

/// A sheet as rows of cells; row 0 is the header when the sheet has one
pub type Table = Vec<Vec<String>>;
