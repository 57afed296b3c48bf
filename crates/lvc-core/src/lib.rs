//! lvc-core
//!
//! Domain types, the document provider contract, and the resolver.
//! No AWS SDK or PDF dependency; this is the shared vocabulary of the LVC
//! assistant.

pub mod error;
pub mod models;
pub mod provider;
pub mod resolver;
