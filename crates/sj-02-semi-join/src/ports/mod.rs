//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for external callers
//! - Driven Ports (outbound) - Key-value sources the join reads from

pub mod inbound;
pub mod outbound;

pub use inbound::SemiJoinApi;
pub use outbound::KeyValueSource;
