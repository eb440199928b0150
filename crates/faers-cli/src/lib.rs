//! Library components for the `faers` command-line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
