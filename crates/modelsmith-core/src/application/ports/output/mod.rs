//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `modelsmith-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::domain::{
    ModelInventory, ProjectStructure, RenderContext, RepositoryCoordinate, Signature,
};
use crate::error::SmithResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `modelsmith_adapters::filesystem::LocalFilesystem` (production)
/// - `modelsmith_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SmithResult<()>;

    /// Write text to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> SmithResult<()>;

    /// Write raw bytes to a file, replacing any previous content.
    fn write_bytes(&self, path: &Path, content: &[u8]) -> SmithResult<()>;

    /// Read a whole file as text.
    fn read_file(&self, path: &Path) -> SmithResult<String>;

    /// Read a whole file as bytes.
    fn read_bytes(&self, path: &Path) -> SmithResult<Vec<u8>>;

    /// Mark a file executable.
    fn set_permissions(&self, path: &Path, executable: bool) -> SmithResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents. Missing directories are not an error.
    fn remove_dir_all(&self, path: &Path) -> SmithResult<()>;

    /// Recursively copy `src` into `dst`, creating `dst` as needed.
    fn copy_tree(&self, src: &Path, dst: &Path) -> SmithResult<()>;

    /// Names of the immediate subdirectories of `path`, sorted.
    fn list_subdirectories(&self, path: &Path) -> SmithResult<Vec<String>>;
}

/// Port for the remote, versioned home of the model artifact.
///
/// Implemented by:
/// - `modelsmith_adapters::source::GitHubSource` (GitHub REST + raw content)
#[cfg_attr(test, automock)]
pub trait ArtifactSource: Send + Sync {
    /// All tag names, newest first as the host reports them.
    fn list_tags(&self, repo: &RepositoryCoordinate) -> SmithResult<Vec<String>>;

    /// All branch names.
    fn list_branches(&self, repo: &RepositoryCoordinate) -> SmithResult<Vec<String>>;

    /// The tag the host considers the latest release.
    fn latest_tag(&self, repo: &RepositoryCoordinate) -> SmithResult<String>;

    /// Download `artifact_path` as it exists at `reference`.
    fn fetch_artifact(
        &self,
        repo: &RepositoryCoordinate,
        reference: &str,
        artifact_path: &str,
    ) -> SmithResult<Vec<u8>>;
}

/// Port for turning an artifact payload into classes.
///
/// Implemented by:
/// - `modelsmith_adapters::parser::XmiParser`
pub trait ModelParser: Send + Sync {
    fn parse(&self, payload: &[u8]) -> SmithResult<ModelInventory>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `modelsmith_adapters::renderer::JinjaRenderer`
pub trait TemplateRenderer: Send + Sync {
    /// Render the template named by `context` against its data.
    fn render(&self, context: &RenderContext) -> SmithResult<String>;
}

/// Port for putting a freshly scaffolded project under version control.
///
/// Implemented by:
/// - `modelsmith_adapters::vcs::GitCommandInitializer` (drives `git`)
#[cfg_attr(test, automock)]
pub trait RepositoryInitializer: Send + Sync {
    /// Create an empty repository at `path`.
    fn init(&self, path: &Path) -> SmithResult<()>;

    /// Stage every file in the working tree.
    fn stage_all(&self, path: &Path) -> SmithResult<()>;

    /// Commit what is staged; returns the commit id if known.
    fn commit(&self, path: &Path, message: &str, author: &Signature) -> SmithResult<Option<String>>;
}

/// Port for the base project every consumer starts from.
///
/// Implemented by:
/// - `modelsmith_adapters::skeleton::BuiltinSkeleton`
/// - `modelsmith_adapters::skeleton::DirectorySkeleton`
pub trait SkeletonProvider: Send + Sync {
    /// The skeleton to materialise at `root`.
    fn skeleton(&self, root: PathBuf) -> SmithResult<ProjectStructure>;
}
