//! Inbound Ports (Driving Ports)
//!
//! The API external callers use to run semi-joins between two sources.

use async_trait::async_trait;

use crate::domain::JoinResult;
use crate::error::JoinError;

/// Semi-join API (Driving Port)
#[async_trait]
pub trait SemiJoinApi: Send + Sync {
    /// Value type of the left source
    type LeftValue: Send;
    /// Value type of the right source
    type RightValue: Send;

    /// Join both sources and fetch the values of every common key
    ///
    /// # Errors
    /// * `JoinError::Filter` - the configuration is invalid
    /// * `JoinError::Source` - a source call failed or timed out
    async fn run(&self) -> Result<JoinResult<Self::LeftValue, Self::RightValue>, JoinError>;

    /// Count common keys without fetching any value
    async fn count_matches(&self) -> Result<usize, JoinError>;
}
