//! Base project skeletons.

mod builtin;
mod directory;

pub use builtin::BuiltinSkeleton;
pub use directory::DirectorySkeleton;
