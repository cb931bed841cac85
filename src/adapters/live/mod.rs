//! Live adapters for real external interactions.

pub mod build_tool;
pub mod filesystem;
