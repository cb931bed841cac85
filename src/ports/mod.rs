//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the tools and an external
//! system (the build tool, the filesystem). Implementations live in
//! `src/adapters/`.

pub mod build_tool;
pub mod filesystem;

pub use build_tool::{BuildOutput, BuildTool, Invocation};
pub use filesystem::FileSystem;
