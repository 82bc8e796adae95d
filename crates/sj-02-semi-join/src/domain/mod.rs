//! Domain Layer - pure join logic, no I/O

pub mod config;
pub mod engine;
pub mod result;

pub use config::{
    JoinConfig, JoinConfigBuilder, DEFAULT_CAPACITY, DEFAULT_PARALLEL_THRESHOLD,
    DEFAULT_FETCH_CONCURRENCY, DEFAULT_SOURCE_TIMEOUT,
};
pub use engine::{probabilistic_semi_join, SemiJoinEngine};
pub use result::{JoinMatch, JoinResult, JoinStats, KeyJoin, KeyMatch};
