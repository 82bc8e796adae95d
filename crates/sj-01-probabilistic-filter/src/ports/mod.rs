//! Ports Layer
//!
//! Capability traits the join engine is written against.

pub mod membership;

pub use membership::MembershipFilter;
