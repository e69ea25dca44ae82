//! Composition root: builds adapters and core services from the loaded
//! configuration and the global flags.
//!
//! Flags win over config values; everything below this module only sees
//! constructed services.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use modelsmith_adapters::{
    BuiltinSkeleton, DirectorySkeleton, GitCommandInitializer, GitHubSource, GitHubSourceConfig,
    JinjaRenderer, LocalFilesystem, XmiParser,
};
use modelsmith_core::{
    application::{
        ArtifactCache, ArtifactRequest, ArtifactSource, CatalogService, Filesystem, ModelGenerator,
        ModelLoader, ScaffoldService, ScaffoldSettings, SkeletonProvider, TemplateRenderer,
    },
    domain::{GeneratedArea, ProjectLayout, RepositoryCoordinate, Signature, VersionRef},
    error::SmithError,
};

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult};

pub struct AppContext {
    global: GlobalArgs,
    config: AppConfig,
}

impl AppContext {
    pub fn new(global: GlobalArgs, config: AppConfig) -> Self {
        Self { global, config }
    }

    pub fn global(&self) -> &GlobalArgs {
        &self.global
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// `--owner`/`--repo` over `source.owner`/`source.repository`.
    pub fn repository(&self) -> CliResult<RepositoryCoordinate> {
        let owner = self
            .global
            .owner
            .clone()
            .unwrap_or_else(|| self.config.source.owner.clone());
        let name = self
            .global
            .repo
            .clone()
            .unwrap_or_else(|| self.config.source.repository.clone());
        Ok(RepositoryCoordinate::new(owner, name).map_err(SmithError::from)?)
    }

    /// The artifact selected by `--tag` and `--force`.
    pub fn artifact_request(&self) -> CliResult<ArtifactRequest> {
        Ok(ArtifactRequest::new(
            self.repository()?,
            VersionRef::parse(&self.global.tag),
            self.config.source.artifact_path.clone(),
        )
        .force_refresh(self.global.force))
    }

    pub fn catalog(&self) -> CliResult<CatalogService> {
        Ok(CatalogService::new(self.source()?, self.repository()?))
    }

    pub fn model_loader(&self) -> CliResult<ModelLoader> {
        self.loader(self.filesystem())
    }

    pub fn model_generator(&self) -> CliResult<ModelGenerator> {
        let filesystem = self.filesystem();
        let renderer: Arc<dyn TemplateRenderer> = Arc::new(JinjaRenderer::new()?);
        self.generator(filesystem, renderer)
    }

    pub fn scaffold_service(&self) -> CliResult<ScaffoldService> {
        let filesystem = self.filesystem();
        let renderer: Arc<dyn TemplateRenderer> = Arc::new(JinjaRenderer::new()?);
        let generator = self.generator(filesystem.clone(), renderer.clone())?;

        Ok(ScaffoldService::new(
            generator,
            self.skeleton(),
            renderer,
            filesystem,
            Box::new(GitCommandInitializer::new()),
            self.scaffold_settings(),
        ))
    }

    pub fn scaffold_settings(&self) -> ScaffoldSettings {
        let scaffold = &self.config.scaffold;
        ScaffoldSettings {
            output_dir: scaffold.output_dir.clone(),
            project_prefix: scaffold.project_prefix.clone(),
            layout: ProjectLayout::default(),
            author: Signature::new(&scaffold.author_name, &scaffold.author_email),
            ..ScaffoldSettings::default()
        }
    }

    // ── adapters ──────────────────────────────────────────────────────────

    fn source(&self) -> CliResult<Arc<dyn ArtifactSource>> {
        let source = &self.config.source;
        let github = GitHubSource::new(GitHubSourceConfig {
            api_url: source.api_url.clone(),
            raw_url: source.raw_url.clone(),
            token: self.config.token(),
        })?;
        Ok(Arc::new(github))
    }

    fn filesystem(&self) -> Arc<dyn Filesystem> {
        Arc::new(LocalFilesystem::new())
    }

    fn skeleton(&self) -> Box<dyn SkeletonProvider> {
        match &self.config.scaffold.skeleton_dir {
            Some(dir) => {
                debug!(dir = %dir.display(), "Using skeleton directory");
                Box::new(DirectorySkeleton::new(dir.clone()))
            }
            None => Box::new(BuiltinSkeleton::new(ProjectLayout::default())),
        }
    }

    fn loader(&self, filesystem: Arc<dyn Filesystem>) -> CliResult<ModelLoader> {
        let cache = ArtifactCache::new(self.source()?, filesystem, self.config.cache_root());
        Ok(ModelLoader::new(cache, Arc::new(XmiParser::new())))
    }

    fn generator(
        &self,
        filesystem: Arc<dyn Filesystem>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> CliResult<ModelGenerator> {
        Ok(ModelGenerator::new(
            self.loader(filesystem.clone())?,
            renderer,
            filesystem,
            GeneratedArea::new(self.generated_area()),
            ProjectLayout::default(),
        ))
    }

    fn generated_area(&self) -> PathBuf {
        self.config.generated_area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(global: GlobalArgs) -> AppContext {
        AppContext::new(global, AppConfig::default())
    }

    #[test]
    fn repository_comes_from_config() {
        let ctx = context(GlobalArgs::for_tests());
        assert_eq!(
            ctx.repository().unwrap().to_string(),
            "FINTmodels/fint-informasjonsmodell"
        );
    }

    #[test]
    fn flags_override_repository() {
        let ctx = context(GlobalArgs {
            owner: Some("acme".into()),
            repo: Some("model".into()),
            ..GlobalArgs::for_tests()
        });
        assert_eq!(ctx.repository().unwrap().to_string(), "acme/model");
    }

    #[test]
    fn artifact_request_follows_tag_and_force() {
        let ctx = context(GlobalArgs {
            tag: "v3.1.0".into(),
            force: true,
            ..GlobalArgs::for_tests()
        });
        let request = ctx.artifact_request().unwrap();
        assert_eq!(request.reference, VersionRef::Named("v3.1.0".into()));
        assert!(request.force_refresh);
        assert_eq!(request.artifact_path, "FINT-informasjonsmodell.xml");
    }

    #[test]
    fn latest_tag_stays_unresolved() {
        let request = context(GlobalArgs::for_tests()).artifact_request().unwrap();
        assert!(request.reference.is_latest());
        assert!(!request.force_refresh);
    }

    #[test]
    fn scaffold_settings_follow_config() {
        let mut config = AppConfig::default();
        config.scaffold.project_prefix = "consumer-".into();
        config.scaffold.author_name = "Ola".into();
        let settings = AppContext::new(GlobalArgs::for_tests(), config).scaffold_settings();
        assert_eq!(settings.project_prefix, "consumer-");
        assert_eq!(settings.author.name, "Ola");
        assert_eq!(settings.commit_message, "Initial commit");
    }

    #[test]
    fn services_build_without_network() {
        let ctx = context(GlobalArgs::for_tests());
        assert!(ctx.catalog().is_ok());
        assert!(ctx.model_generator().is_ok());
        assert!(ctx.scaffold_service().is_ok());
    }
}
