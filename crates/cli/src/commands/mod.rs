//! CLI command implementations.

pub mod ask;
pub mod models;
pub mod tools_cmd;
