//! Command implementations for the `testra` binary.

pub mod common;
pub mod ping;
pub mod results;
pub mod start;
