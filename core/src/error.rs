use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Transaction file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("Invalid amount '{value}'")]
    InvalidAmount { value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScanError {
    /// Transport status for this failure: a missing source file is a 404,
    /// anything else is reported as a generic 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::FileNotFound { .. } => 404,
            _ => 500,
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
