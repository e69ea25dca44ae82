//! Scaffold Service - main application orchestrator.
//!
//! This service drives consumer setup, strictly in order:
//! 1. Validate the request
//! 2. Resolve the model version
//! 3. Materialise the base skeleton
//! 4. Generate the whole model
//! 5. Copy the selected component/package into the project
//! 6. Optionally copy the shared person model
//! 7. Render the configuration sources from the copied models
//! 8. Patch the build descriptor
//! 9. Write the README
//! 10. Initialise the repository with one commit
//!
//! Steps 3-10 are not transactional. A failure leaves whatever was already
//! written on disk so the operator can inspect it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, RepositoryInitializer, SkeletonProvider, TemplateRenderer},
        services::{artifact_cache::ArtifactRequest, model_generator::ModelGenerator},
    },
    domain::{
        ConstantsData, DomainValidator as validator, FileContent, FsEntry, InsertionPoint, LinkMapperData,
        Model, PERSON_PACKAGE, ProjectLayout, ProjectStructure, PropertiesData, RenderContext,
        RestEndpointsData, Signature, TextPatch, project_dir_name,
    },
    error::SmithResult,
};

/// Fixed knobs of the scaffolder.
#[derive(Debug, Clone)]
pub struct ScaffoldSettings {
    /// Directory projects are created in.
    pub output_dir: PathBuf,
    /// Prepended to the consumer name to form the project directory.
    pub project_prefix: String,
    pub layout: ProjectLayout,
    pub author: Signature,
    pub commit_message: String,
}

impl Default for ScaffoldSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            project_prefix: "fint-consumer-".into(),
            layout: ProjectLayout::default(),
            author: Signature::new("modelsmith", "scaffold@modelsmith.dev"),
            commit_message: "Initial commit".into(),
        }
    }
}

/// Input of [`ScaffoldService::setup`].
#[derive(Debug, Clone)]
pub struct SetupRequest {
    /// Consumer name, e.g. `personal`.
    pub name: String,
    /// Model component, e.g. `administrasjon`.
    pub component: String,
    /// Package inside the component; empty copies the whole component.
    pub package: String,
    pub include_person: bool,
    /// Which model version, and whether to bypass the cache.
    pub artifact: ArtifactRequest,
}

/// What setup produced.
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub project_path: PathBuf,
    pub reference: String,
    pub models: Vec<Model>,
    pub commit: Option<String>,
    /// Non-fatal problems worth telling the operator about.
    pub warnings: Vec<String>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    generator: ModelGenerator,
    skeleton: Box<dyn SkeletonProvider>,
    renderer: Arc<dyn TemplateRenderer>,
    filesystem: Arc<dyn Filesystem>,
    repository: Box<dyn RepositoryInitializer>,
    settings: ScaffoldSettings,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    pub fn new(
        generator: ModelGenerator,
        skeleton: Box<dyn SkeletonProvider>,
        renderer: Arc<dyn TemplateRenderer>,
        filesystem: Arc<dyn Filesystem>,
        repository: Box<dyn RepositoryInitializer>,
        settings: ScaffoldSettings,
    ) -> Self {
        Self {
            generator,
            skeleton,
            renderer,
            filesystem,
            repository,
            settings,
        }
    }

    /// Where the project for `name` is created.
    pub fn project_path(&self, name: &str) -> PathBuf {
        self.settings
            .output_dir
            .join(project_dir_name(&self.settings.project_prefix, name))
    }

    /// Scaffold a consumer project.
    #[instrument(
        skip_all,
        fields(
            name = %request.name,
            component = %request.component,
            package = %request.package
        )
    )]
    pub fn setup(&self, request: &SetupRequest) -> SmithResult<SetupReport> {
        // 1. Validate before touching anything
        validator::validate_consumer_name(&request.name)?;
        validator::require("component", &request.component)?;
        validator::validate_model_selector("component", &request.component)?;
        validator::validate_model_selector("package", &request.package)?;

        let mut warnings = Vec::new();

        // 2. Resolve version
        let reference = self
            .generator
            .loader()
            .cache()
            .resolve_reference(&request.artifact.repository, &request.artifact.reference)?;
        let artifact = request.artifact.pinned(&reference);
        info!(reference = %reference, "Using model version");

        // 3. Skeleton
        let project_path = self.project_path(&request.name);
        if self.filesystem.exists(&project_path) {
            warn!(path = %project_path.display(), "Project directory exists, regenerating in place");
        }
        let structure = self.skeleton.skeleton(project_path.clone())?;
        self.write_structure(&structure)?;
        info!(path = %project_path.display(), "Skeleton materialised");

        // 4. Generate the whole model
        let generation = self.generator.generate(&artifact)?;
        if let Some(e) = generation.cache_warning {
            warnings.push(format!("Artifact cache: {e}"));
        }

        // 5 + 6. Copy model packages
        let layout = &self.settings.layout;
        let models_dir = project_path.join(layout.models_dir());
        self.add_models(&request.component, &request.package, &models_dir)?;
        if request.include_person {
            self.add_person(&models_dir)?;
        }

        // 7. Configuration sources
        let models = self.discover_models(&models_dir)?;
        self.write_config_files(&project_path, &request.name, &request.component, &request.package, &models)?;

        // 8. Build descriptor
        if let Some(warning) = self.patch_build_file(&project_path, &request.component)? {
            warnings.push(warning);
        }

        // 9. README
        let readme = readme(
            &project_dir_name(&self.settings.project_prefix, &request.name),
            &reference,
            &request.package,
            &request.component,
        );
        self.filesystem
            .write_file(&project_path.join(layout.readme_file()), &readme)?;

        // 10. Initial commit
        let commit = self.commit(&project_path)?;

        info!(
            path = %project_path.display(),
            models = models.len(),
            "Setup completed"
        );

        Ok(SetupReport {
            project_path,
            reference,
            models,
            commit,
            warnings,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write the skeleton entries; existing files are overwritten.
    fn write_structure(&self, structure: &ProjectStructure) -> SmithResult<()> {
        structure.validate()?;
        self.filesystem.create_dir_all(structure.root())?;

        for entry in structure.entries() {
            let path = structure.root().join(entry.path());
            match entry {
                FsEntry::Directory(_) => self.filesystem.create_dir_all(&path)?,
                FsEntry::File(file) => {
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    match &file.content {
                        FileContent::Text(text) => self.filesystem.write_file(&path, text)?,
                        FileContent::Binary(bytes) => self.filesystem.write_bytes(&path, bytes)?,
                    }
                    if file.permissions.executable_flag() {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Replace the models directory with `<area>/<component>/<package>`.
    fn add_models(&self, component: &str, package: &str, models_dir: &Path) -> SmithResult<()> {
        let src = self.generator.area().package_dir(component, package);
        if !self.filesystem.exists(&src) {
            return Err(ApplicationError::ModelDirectoryMissing { path: src }.into());
        }
        info!(src = %src.display(), dst = %models_dir.display(), "Copying models");
        self.filesystem.remove_dir_all(models_dir)?;
        self.filesystem.copy_tree(&src, models_dir)
    }

    fn add_person(&self, models_dir: &Path) -> SmithResult<()> {
        let src = self.generator.area().person_dir();
        if !self.filesystem.exists(&src) {
            return Err(ApplicationError::ModelDirectoryMissing { path: src }.into());
        }
        let dst = models_dir.join(PERSON_PACKAGE);
        info!(src = %src.display(), dst = %dst.display(), "Copying person model");
        self.filesystem.copy_tree(&src, &dst)
    }

    fn discover_models(&self, models_dir: &Path) -> SmithResult<Vec<Model>> {
        Ok(self
            .filesystem
            .list_subdirectories(models_dir)?
            .into_iter()
            .map(Model::new)
            .collect())
    }

    fn write_config_files(
        &self,
        project_path: &Path,
        name: &str,
        component: &str,
        package: &str,
        models: &[Model],
    ) -> SmithResult<()> {
        let layout = &self.settings.layout;
        let models = models.to_vec();

        let files = [
            (
                layout.consumer_props_file(),
                RenderContext::properties(&PropertiesData {
                    models: models.clone(),
                })?,
            ),
            (
                layout.constants_file(),
                RenderContext::constants(&ConstantsData {
                    consumer_name: name.to_string(),
                })?,
            ),
            (
                layout.link_mapper_file(),
                RenderContext::link_mapper(&LinkMapperData {
                    component: component.to_string(),
                    package: package.to_string(),
                    models: models.clone(),
                })?,
            ),
            (
                layout.rest_endpoints_file(),
                RenderContext::rest_endpoints(&RestEndpointsData { models })?,
            ),
        ];

        for (relative, context) in files {
            let content = self.renderer.render(&context)?;
            let path = project_path.join(relative);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            info!(template = %context.template(), path = %path.display(), "Writing");
            self.filesystem.write_file(&path, &content)?;
        }

        Ok(())
    }

    /// Returns a warning when the marker line was not found.
    fn patch_build_file(&self, project_path: &Path, component: &str) -> SmithResult<Option<String>> {
        let build_file = project_path.join(self.settings.layout.build_file());
        let original = self.filesystem.read_file(&build_file)?;

        let outcome = TextPatch::new()
            .with(InsertionPoint::model_dependency(component))
            .apply(&original);

        self.filesystem.write_file(&build_file, &outcome.content)?;

        if outcome.missing.is_empty() {
            return Ok(None);
        }
        let warning = format!(
            "{} has no insertion point for: {}",
            build_file.display(),
            outcome.missing.join(", ")
        );
        warn!("{}", warning);
        Ok(Some(warning))
    }

    fn commit(&self, project_path: &Path) -> SmithResult<Option<String>> {
        self.repository.init(project_path)?;
        self.repository.stage_all(project_path)?;
        let commit = self.repository.commit(
            project_path,
            &self.settings.commit_message,
            &self.settings.author,
        )?;
        info!(commit = commit.as_deref().unwrap_or("unknown"), "Initial commit created");
        Ok(commit)
    }
}

fn readme(project_name: &str, reference: &str, package: &str, component: &str) -> String {
    format!(
        "# {project_name}\n\nGenerated from tag `{reference}` on package `{package}` and component `{component}`.\n"
    )
}
