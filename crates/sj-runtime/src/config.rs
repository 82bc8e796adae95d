//! Runtime configuration
//!
//! # Environment Variables
//!
//! - `SJ_LEFT_SOURCE`: path of the left JSON object file (required)
//! - `SJ_RIGHT_SOURCE`: path of the right JSON object file (required)
//! - `SJ_LOG_LEVEL`: tracing filter directive, falls back to `RUST_LOG`
//!   (default: info)
//! - `SJ_JSON_OUTPUT`: print the result as JSON when `1`, `true` or `yes`
//!
//! Join tuning (`SJ_CAPACITY`, `SJ_FPR`, ...) is read by `JoinConfig::from_env`.

use anyhow::{Context, Result};
use std::path::PathBuf;

use sj_02_semi_join::JoinConfig;

/// Default tracing filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Everything the binary needs to run one join
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub left_source: PathBuf,
    pub right_source: PathBuf,
    pub log_level: String,
    pub json_output: bool,
    pub join: JoinConfig,
}

impl RuntimeConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let left_source = lookup("SJ_LEFT_SOURCE").context("SJ_LEFT_SOURCE is not set")?;
        let right_source = lookup("SJ_RIGHT_SOURCE").context("SJ_RIGHT_SOURCE is not set")?;

        let join = JoinConfig::from_lookup(&lookup).context("Invalid join configuration")?;

        Ok(Self {
            left_source: PathBuf::from(left_source),
            right_source: PathBuf::from(right_source),
            log_level: log_level(&lookup),
            json_output: lookup("SJ_JSON_OUTPUT")
                .map(|raw| is_truthy(&raw))
                .unwrap_or(false),
            join,
        })
    }
}

/// Tracing filter directive from `SJ_LOG_LEVEL`, then `RUST_LOG`
pub fn log_level<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("SJ_LOG_LEVEL")
        .or_else(|| lookup("RUST_LOG"))
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
