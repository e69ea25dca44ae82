//! The Gradle/Java consumer skeleton compiled into the binary.

use std::path::PathBuf;

use modelsmith_core::{
    application::ports::SkeletonProvider,
    domain::{ProjectLayout, ProjectStructure, RelativePath},
    error::SmithResult,
};

const BUILD_GRADLE: &str = include_str!("files/build.gradle");
const GRADLEW: &str = include_str!("files/gradlew");
const WRAPPER_PROPERTIES: &str = include_str!("files/gradle-wrapper.properties");
const GITIGNORE: &str = include_str!("files/gitignore");
const APPLICATION_JAVA: &str = include_str!("files/Application.java");
const APPLICATION_YML: &str = include_str!("files/application.yml");

/// Package the Java sources above are written against.
const SOURCE_PACKAGE: &str = "no.fint.consumer";

#[derive(Debug, Clone, Default)]
pub struct BuiltinSkeleton {
    layout: ProjectLayout,
}

impl BuiltinSkeleton {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }
}

impl SkeletonProvider for BuiltinSkeleton {
    fn skeleton(&self, root: PathBuf) -> SmithResult<ProjectStructure> {
        let project_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "consumer".into());

        let java_root = self.layout.java_root();
        let application = APPLICATION_JAVA.replace(SOURCE_PACKAGE, self.layout.java_package());

        Ok(ProjectStructure::new(root)
            .with_file(self.layout.build_file(), BUILD_GRADLE)
            .with_file(
                "settings.gradle",
                format!("rootProject.name = '{project_name}'\n"),
            )
            .with_executable("gradlew", GRADLEW)
            .with_file("gradle/wrapper/gradle-wrapper.properties", WRAPPER_PROPERTIES)
            .with_file(".gitignore", GITIGNORE)
            .with_file(java_root.join("Application.java")?, application)
            .with_directory(java_root.join("config")?)
            .with_directory(java_root.join("utils")?)
            .with_directory(self.layout.models_dir())
            .with_file(
                RelativePath::new("src/main/resources/application.yml"),
                APPLICATION_YML,
            ))
    }
}
