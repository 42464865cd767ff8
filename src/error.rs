use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audit serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Audit log {} is locked, gave up after {attempts} attempts", .path.display())]
    LockContention { path: PathBuf, attempts: u32 },

    #[error("Path has no file name: {}", .0.display())]
    MissingFileName(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl SortError {
    /// Short, stable identifier used in audit rows.
    pub fn kind(&self) -> &'static str {
        match self {
            SortError::Config(_) => "Config",
            SortError::EnvVar(_) => "EnvVar",
            SortError::Io(_) => "Io",
            SortError::Serialize(_) => "Serialize",
            SortError::LockContention { .. } => "LockContention",
            SortError::MissingFileName(_) => "MissingFileName",
            SortError::NotADirectory(_) => "NotADirectory",
        }
    }
}

pub type Result<T> = std::result::Result<T, SortError>;
