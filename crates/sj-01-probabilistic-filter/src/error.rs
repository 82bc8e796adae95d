//! Error types for the probabilistic filter

use thiserror::Error;

/// Errors raised while building or combining filters
///
/// Both variants are fatal: they signal a caller bug, never a transient
/// condition, so nothing in the workspace retries them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Invalid filter configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error(
        "Incompatible filters: {left_bits} bits / {left_hashes} hashes vs \
         {right_bits} bits / {right_hashes} hashes"
    )]
    IncompatibleFilters {
        left_bits: usize,
        right_bits: usize,
        left_hashes: usize,
        right_hashes: usize,
    },
}

impl FilterError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
