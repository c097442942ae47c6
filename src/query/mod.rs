//! Read-only queries over the store

pub mod engine;

pub use engine::{MatchMode, QueryEngine};
