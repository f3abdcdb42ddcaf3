//! Nether fortress crossroad finder library
//!
//! Re-exports modules for use by binaries and tools.

pub mod config;
pub mod generator;
pub mod pieces;
pub mod search;
pub mod shapes;
pub mod version;
