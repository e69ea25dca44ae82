//! Infrastructure adapters for modelsmith.
//!
//! This crate implements the ports defined in `modelsmith-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod parser;
pub mod renderer;
pub mod skeleton;
pub mod source;
pub mod vcs;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use parser::XmiParser;
pub use renderer::JinjaRenderer;
pub use skeleton::{BuiltinSkeleton, DirectorySkeleton};
pub use source::{GitHubSource, GitHubSourceConfig};
pub use vcs::GitCommandInitializer;
