use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for territory-summary
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Source sheet '{sheet}' not found")]
    SourceNotFound { code: u16, sheet: String },

    #[error("[E{code:04}] Missing required column(s): {}", .missing.join(", "))]
    Schema { code: u16, missing: Vec<String> },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Watch error: {message}")]
    Watch {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SummaryError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message, None)
    }

    /// Create a configuration error with specific code and file path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn source_not_found(sheet: impl Into<String>) -> Self {
        Self::SourceNotFound {
            code: ErrorCode::SHEET_SOURCE_NOT_FOUND,
            sheet: sheet.into(),
        }
    }

    pub fn schema(missing: Vec<String>) -> Self {
        Self::Schema {
            code: ErrorCode::SHEET_MISSING_COLUMNS,
            missing,
        }
    }

    /// Create a storage error with default code
    pub fn storage(message: impl Into<String>) -> Self {
        Self::storage_with_code(ErrorCode::STORAGE_GENERIC, message, None)
    }

    /// Create a storage error with specific code and path
    pub fn storage_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn watch(message: impl Into<String>) -> Self {
        Self::Watch {
            code: ErrorCode::WATCH_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    ///
    /// Variants without a source slot are returned unchanged.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Storage { source: src, .. }
            | Self::Watch { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::SourceNotFound { .. } | Self::Schema { .. } => {}
        }
        self
    }

    /// Attach a path to config and storage errors
    pub fn with_path(mut self, new_path: impl Into<PathBuf>) -> Self {
        match &mut self {
            Self::Config { path, .. } | Self::Storage { path, .. } => {
                *path = Some(new_path.into());
            }
            _ => {}
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::SourceNotFound { .. } => 3,
            Self::Schema { .. } => 4,
            Self::Storage { .. } => 5,
            Self::Watch { .. } => 6,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::SourceNotFound { code, .. }
            | Self::Schema { code, .. }
            | Self::Storage { code, .. }
            | Self::Watch { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path, .. } => {
                if let Some(p) = path {
                    format!("Configuration problem in {}: {}", p.display(), message)
                } else {
                    format!("Configuration problem: {}", message)
                }
            }
            Self::SourceNotFound { sheet, .. } => {
                format!("Sheet '{}' not found. Check the source sheet name.", sheet)
            }
            Self::Schema { missing, .. } => format!(
                "The source sheet must have 'District' and 'Status' columns (missing: {}).",
                missing.join(", ")
            ),
            Self::Storage { message, path, .. } => {
                if let Some(p) = path {
                    format!("Storage error at {}: {}", p.display(), message)
                } else {
                    format!("Storage error: {}", message)
                }
            }
            Self::Watch { message, .. } => format!("Watch error: {}", message),
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut out = self.to_string();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            out.push_str(&format!("\n  caused by: {}", cause));
            current = cause.source();
        }
        out
    }
}

/// Type alias for Results using SummaryError
pub type Result<T> = std::result::Result<T, SummaryError>;

impl From<std::io::Error> for SummaryError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::STORAGE_NOT_FOUND, "File or directory not found"),
            ErrorKind::PermissionDenied => {
                (ErrorCode::STORAGE_PERMISSION_DENIED, "Permission denied")
            }
            _ => (ErrorCode::STORAGE_IO_ERROR, "IO operation failed"),
        };

        SummaryError::storage_with_code(code, message, None).with_source(err)
    }
}

impl From<csv::Error> for SummaryError {
    fn from(err: csv::Error) -> Self {
        SummaryError::storage_with_code(ErrorCode::STORAGE_CSV_ERROR, "Malformed CSV data", None)
            .with_source(err)
    }
}

impl From<toml::de::Error> for SummaryError {
    fn from(err: toml::de::Error) -> Self {
        SummaryError::config_with_code(
            ErrorCode::CONFIG_INVALID_TOML,
            "Invalid TOML syntax",
            None,
        )
        .with_source(err)
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(err: serde_json::Error) -> Self {
        SummaryError::storage_with_code(
            ErrorCode::STORAGE_SERIALIZATION_ERROR,
            "Failed to serialize summary",
            None,
        )
        .with_source(err)
    }
}

impl From<notify::Error> for SummaryError {
    fn from(err: notify::Error) -> Self {
        SummaryError::Watch {
            code: ErrorCode::WATCH_INIT_FAILED,
            message: "Failed to watch workbook".to_string(),
            source: Some(Box::new(err)),
        }
    }
}
