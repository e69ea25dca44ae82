//! A user-supplied skeleton directory.
//!
//! Every file and directory below the skeleton root is reproduced in the new
//! project. A `.git` directory inside the skeleton is ignored so the new
//! project starts with a fresh history.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::{DirEntry, WalkDir};

use modelsmith_core::{
    application::{ApplicationError, ports::SkeletonProvider},
    domain::{FileContent, Permissions, ProjectStructure, RelativePath},
    error::{SmithError, SmithResult},
};

#[derive(Debug, Clone)]
pub struct DirectorySkeleton {
    dir: PathBuf,
}

impl DirectorySkeleton {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SkeletonProvider for DirectorySkeleton {
    #[instrument(skip_all, fields(dir = %self.dir.display()))]
    fn skeleton(&self, root: PathBuf) -> SmithResult<ProjectStructure> {
        if !self.dir.is_dir() {
            return Err(fs_error(&self.dir, "skeleton directory does not exist"));
        }

        let mut structure = ProjectStructure::new(root);
        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_git_dir(e));

        for entry in walker {
            let entry = entry.map_err(|e| fs_error(&self.dir, &e.to_string()))?;
            let relative = entry
                .path()
                .strip_prefix(&self.dir)
                .map_err(|e| fs_error(entry.path(), &e.to_string()))?;
            let relative = RelativePath::try_new(relative)?;

            if entry.file_type().is_dir() {
                structure.add_directory(relative);
                continue;
            }

            let bytes = std::fs::read(entry.path())
                .map_err(|e| fs_error(entry.path(), &format!("Failed to read: {}", e)))?;
            let permissions = if is_executable(&entry) {
                Permissions::executable()
            } else {
                Permissions::read_write()
            };
            debug!(path = %relative, bytes = bytes.len(), "Skeleton file");
            structure.add_file(relative, FileContent::from(bytes), permissions);
        }

        Ok(structure)
    }
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == ".git"
}

#[cfg(unix)]
fn is_executable(entry: &DirEntry) -> bool {
    use std::os::unix::fs::PermissionsExt;
    entry
        .metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_entry: &DirEntry) -> bool {
    false
}

fn fs_error(path: &Path, reason: &str) -> SmithError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reproduces_tree_and_skips_git() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        std::fs::create_dir_all(dir.join("gradle/wrapper")).unwrap();
        std::fs::create_dir_all(dir.join(".git/objects")).unwrap();
        std::fs::write(dir.join("build.gradle"), "/* --> Models <-- */\n").unwrap();
        std::fs::write(dir.join("gradle/wrapper/gradle-wrapper.jar"), [0x50, 0x4b, 0xff]).unwrap();
        std::fs::write(dir.join(".git/HEAD"), "ref").unwrap();

        let structure = DirectorySkeleton::new(dir)
            .skeleton(PathBuf::from("/out/p"))
            .unwrap();

        let paths: Vec<String> = structure
            .entries()
            .iter()
            .map(|e| e.path().to_string())
            .collect();
        assert!(paths.contains(&"build.gradle".to_string()));
        assert!(paths.contains(&"gradle/wrapper/gradle-wrapper.jar".to_string()));
        assert!(!paths.iter().any(|p| p.starts_with(".git")));

        let jar = structure
            .files()
            .find(|f| f.path.as_path().ends_with("gradle-wrapper.jar"))
            .unwrap();
        assert!(matches!(jar.content, FileContent::Binary(_)));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = DirectorySkeleton::new("/definitely/not/here")
            .skeleton(PathBuf::from("/out/p"))
            .unwrap_err();
        assert_eq!(err.category(), modelsmith_core::error::ErrorCategory::Io);
    }
}
