//! CLI command handlers
//!
//! This module contains all CLI-related functionality including:
//! - Argument parsing structures
//! - Command routing

pub mod args;
pub mod router;

// Re-export the main CLI structures for convenience
pub use args::{Cli, Commands, SheetArgs};
pub use router::execute_command;
