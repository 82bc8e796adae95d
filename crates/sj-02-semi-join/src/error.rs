//! Error types for the semi-join subsystem

use sj_01_probabilistic_filter::FilterError;
use thiserror::Error;

/// Errors that can occur while running a join
#[derive(Debug, Error)]
pub enum JoinError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Errors from key-value sources
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Key not found in {source_name}: {key}")]
    KeyNotFound { source_name: String, key: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout waiting for {source_name}")]
    Timeout { source_name: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
