use std::io;

use thiserror::Error;

/// Errors that can abort startup. Nothing inside a running session fails.
#[derive(Error, Debug)]
pub enum TyxtError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("word list `{name}` unavailable: {reason}")]
    Language { name: String, reason: String },
    #[error("invalid config at {path}: {reason}")]
    Config { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, TyxtError>;
