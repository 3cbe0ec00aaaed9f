//! Data models shared across the engine and the aggregation layer.

pub mod config;
pub mod receipt;
