use std::path::PathBuf;

use thiserror::Error;

use crate::data::validate::ValidationDiagnostic;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Every way an extraction run can stop. All of them are fatal.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("could not determine the home directory for ${{HOME_DIR}}")]
    HomeDirUnavailable,

    #[error("file not found - {}", .path.display())]
    TableNotFound { path: PathBuf },

    #[error("failed to read table '{}': {source}", .path.display())]
    TableRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse table '{table}': {source}")]
    TableParse {
        table: String,
        source: serde_json::Error,
    },

    #[error("table '{table}' failed validation with {} issue(s)", .diagnostics.len())]
    InvalidTable {
        table: String,
        diagnostics: Vec<ValidationDiagnostic>,
    },

    #[error("table '{table}' has no usable total weight")]
    ZeroWeight { table: String },

    #[error("table '{table}': '{entry}' has invalid weight {weight}")]
    InvalidWeight {
        table: String,
        entry: String,
        weight: f64,
    },

    #[error("invalid item id '{0}', expected 'namespace:item_id'")]
    InvalidItemId(String),

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write csv '{}': {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
}
