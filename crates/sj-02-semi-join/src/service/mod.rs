//! Service Layer
//!
//! Contains the application service that drives the join engine through
//! the source ports.

pub mod semi_join_service;

pub use semi_join_service::SemiJoinService;
