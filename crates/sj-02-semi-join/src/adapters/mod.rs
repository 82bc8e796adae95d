//! Adapters Layer (Driven Adapters)
//!
//! Implementations of `KeyValueSource`.
//!
//! ## Adapters
//!
//! - `InMemorySource` - Keys and values held in memory, in insertion order
//! - `JsonFileSource` - Members of a JSON object file

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemorySource;
pub use json_file::JsonFileSource;
