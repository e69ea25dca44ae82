use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::common::{Permissions, RelativePath},
    error::DomainError,
};

/// A base project skeleton ready to be materialised under a root directory.
///
/// Entry paths are relative to `root`. It contains no business logic, only data.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&mut self, path: RelativePath, content: impl Into<FileContent>, perms: Permissions) {
        self.entries.push(FsEntry::File(FileToWrite {
            path,
            content: content.into(),
            permissions: perms,
        }));
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries
            .push(FsEntry::Directory(DirectoryToCreate { path }));
    }

    pub fn with_file(mut self, path: impl Into<RelativePath>, content: impl Into<FileContent>) -> Self {
        self.add_file(path.into(), content, Permissions::default());
        self
    }

    pub fn with_executable(
        mut self,
        path: impl Into<RelativePath>,
        content: impl Into<FileContent>,
    ) -> Self {
        self.add_file(path.into(), content, Permissions::executable());
        self
    }

    pub fn with_directory(mut self, path: impl Into<RelativePath>) -> Self {
        self.add_directory(path.into());
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyStructure);
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();
            if !seen.insert(path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: FileContent,
    pub permissions: Permissions,
}

/// File payload. Skeleton directories may carry binaries such as a
/// wrapper jar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for FileContent {
    /// Valid UTF-8 stays text.
    fn from(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(e) => Self::Binary(e.into_bytes()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_structure_is_invalid() {
        assert_eq!(
            ProjectStructure::new("out").validate(),
            Err(DomainError::EmptyStructure)
        );
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let structure = ProjectStructure::new("out")
            .with_file("build.gradle", "a")
            .with_file("build.gradle", "b");
        assert!(matches!(
            structure.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn files_and_directories_are_split() {
        let structure = ProjectStructure::new("out")
            .with_directory("src/main/java")
            .with_executable("gradlew", "#!/bin/sh")
            .with_file("build.gradle", "");
        assert!(structure.validate().is_ok());
        assert_eq!(structure.files().count(), 2);
        assert_eq!(structure.directories().count(), 1);
        assert!(
            structure
                .files()
                .any(|f| f.permissions.executable_flag())
        );
    }

    #[test]
    fn non_utf8_bytes_stay_binary() {
        assert_eq!(
            FileContent::from(b"plain".to_vec()),
            FileContent::Text("plain".into())
        );
        let jar = FileContent::from(vec![0x50, 0x4b, 0xff, 0x00]);
        assert!(jar.as_text().is_none());
        assert_eq!(jar.as_bytes(), &[0x50, 0x4b, 0xff, 0x00]);
    }
}
