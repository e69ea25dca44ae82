//! Where things live: inside a scaffolded project, and inside the
//! generated-model area.

use std::path::{Path, PathBuf};

use crate::domain::{
    entities::{
        common::{RelativePath, is_path_segment},
        model::ModelClass,
    },
    error::DomainError,
};

/// Component and package of the shared person model.
pub const PERSON_COMPONENT: &str = "felles";
pub const PERSON_PACKAGE: &str = "person";

/// Java package of every scaffolded consumer.
pub const DEFAULT_JAVA_PACKAGE: &str = "no.fint.consumer";

/// File layout of a scaffolded consumer project, relative to its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    java_package: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::new(DEFAULT_JAVA_PACKAGE)
    }
}

impl ProjectLayout {
    pub fn new(java_package: impl Into<String>) -> Self {
        Self {
            java_package: java_package.into(),
        }
    }

    pub fn java_package(&self) -> &str {
        &self.java_package
    }

    /// Java package that generated model directories live under.
    pub fn models_package(&self) -> String {
        format!("{}.models", self.java_package)
    }

    pub fn java_root(&self) -> RelativePath {
        let mut path = PathBuf::from("src/main/java");
        path.extend(self.java_package.split('.').filter(|s| !s.is_empty()));
        RelativePath::new(path)
    }

    pub fn models_dir(&self) -> RelativePath {
        self.java_child("models")
    }

    pub fn consumer_props_file(&self) -> RelativePath {
        self.java_child("config/ConsumerProps.java")
    }

    pub fn constants_file(&self) -> RelativePath {
        self.java_child("config/Constants.java")
    }

    pub fn link_mapper_file(&self) -> RelativePath {
        self.java_child("config/LinkMapper.java")
    }

    pub fn rest_endpoints_file(&self) -> RelativePath {
        self.java_child("utils/RestEndpoints.java")
    }

    pub fn build_file(&self) -> RelativePath {
        RelativePath::new("build.gradle")
    }

    pub fn readme_file(&self) -> RelativePath {
        RelativePath::new("README.md")
    }

    fn java_child(&self, child: &str) -> RelativePath {
        RelativePath::new(self.java_root().into_path_buf().join(child))
    }
}

/// Directory name of a scaffolded project: `<prefix><name>`.
pub fn project_dir_name(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.trim())
}

/// The directory tree the generate step writes model classes into.
///
/// Each class gets its own directory `<root>/<package segments>/<class lowercase>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArea {
    root: PathBuf,
}

impl GeneratedArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn package_dir(&self, component: &str, package: &str) -> PathBuf {
        let mut dir = self.root.join(component);
        if !package.is_empty() {
            dir.push(package);
        }
        dir
    }

    pub fn person_dir(&self) -> PathBuf {
        self.package_dir(PERSON_COMPONENT, PERSON_PACKAGE)
    }

    /// Directory of `class`, refusing names that would leave the area.
    pub fn class_dir(&self, class: &ModelClass) -> Result<PathBuf, DomainError> {
        let mut dir = self.root.clone();
        for segment in class
            .package_segments()
            .map(str::to_string)
            .chain(std::iter::once(model_dir_name(class.name())))
        {
            if !is_path_segment(&segment) {
                return Err(DomainError::MalformedArtifact {
                    reason: format!("class '{class}' does not map to a directory name"),
                });
            }
            dir.push(segment);
        }
        Ok(dir)
    }
}

/// Directory (and Java package segment) name of a model class.
pub fn model_dir_name(class_name: &str) -> String {
    class_name.to_lowercase()
}
