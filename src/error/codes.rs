/// Error code registry for territory-summary
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Sheet and source data errors
/// - 3000-3999: Storage errors
/// - 4000-4999: Watch/trigger errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;

    // Sheet errors (2000-2999)
    pub const SHEET_SOURCE_NOT_FOUND: u16 = 2001;
    pub const SHEET_MISSING_COLUMNS: u16 = 2002;

    // Storage errors (3000-3999)
    pub const STORAGE_GENERIC: u16 = 3000;
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_PERMISSION_DENIED: u16 = 3002;
    pub const STORAGE_NOT_FOUND: u16 = 3004;
    pub const STORAGE_CSV_ERROR: u16 = 3005;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3011;

    // Watch errors (4000-4999)
    pub const WATCH_GENERIC: u16 = 4000;
    pub const WATCH_INIT_FAILED: u16 = 4001;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Invalid TOML syntax in configuration",
        1005 => "Invalid value in configuration",

        2001 => "Source sheet not found in workbook",
        2002 => "Source sheet is missing required columns",

        3000 => "Generic storage error",
        3001 => "Storage I/O error",
        3002 => "Storage permission denied",
        3004 => "Storage item not found",
        3005 => "Malformed CSV data",
        3011 => "Failed to serialize output",

        4000 => "Generic watch error",
        4001 => "Failed to start file watcher",

        _ => "Unknown error code",
    }
}
