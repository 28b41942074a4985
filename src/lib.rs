//! # territory-summary
//!
//! Rolls per-territory status rows up into a per-district completion summary
//! and writes it back to the workbook.
//!
//! ## Usage
//!
//! ```bash
//! territory-summary [--workbook dir] [run|watch|show|export|config]
//! ```
//!
//! ## Modules
//!
//! - `abstractions` - Trait-based sheet access (CSV workbook, in-memory mock)
//! - `app` - Logging setup and fatal error reporting
//! - `cli` - Argument parsing and command routing
//! - `config` - Layered workbook configuration
//! - `core` - Pure summary aggregation and status rules
//! - `error` - Unified error type with codes
//! - `report` - Sheet grid, terminal, CSV and JSON renderings
//! - `trigger` - Manual refresh, edit hook and workbook watcher
pub mod abstractions;
pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod report;
pub mod trigger;
