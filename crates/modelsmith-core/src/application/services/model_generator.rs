//! Model generator - writes the whole model into the generated area.
//!
//! Every class becomes a directory `<area>/<package segments>/<class>/`
//! holding a rendered resource stub. Scaffolding later copies slices of
//! this tree into individual projects.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::{Filesystem, TemplateRenderer},
        services::{
            artifact_cache::ArtifactRequest,
            model_loader::{LoadedModel, ModelLoader},
        },
    },
    domain::{GeneratedArea, ModelClass, ProjectLayout, RenderContext, ResourceData, model_dir_name},
    error::{SmithError, SmithResult},
};

/// Summary of one generate run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub reference: String,
    pub root: PathBuf,
    pub classes: usize,
    pub packages: Vec<String>,
    pub cache_warning: Option<SmithError>,
}

pub struct ModelGenerator {
    loader: ModelLoader,
    renderer: Arc<dyn TemplateRenderer>,
    filesystem: Arc<dyn Filesystem>,
    area: GeneratedArea,
    layout: ProjectLayout,
}

impl ModelGenerator {
    pub fn new(
        loader: ModelLoader,
        renderer: Arc<dyn TemplateRenderer>,
        filesystem: Arc<dyn Filesystem>,
        area: GeneratedArea,
        layout: ProjectLayout,
    ) -> Self {
        Self {
            loader,
            renderer,
            filesystem,
            area,
            layout,
        }
    }

    pub fn loader(&self) -> &ModelLoader {
        &self.loader
    }

    pub fn area(&self) -> &GeneratedArea {
        &self.area
    }

    /// Regenerate the whole area from the requested model version.
    ///
    /// Refuses to run when the area and the artifact cache overlap, since
    /// wiping the area would then delete cached payloads.
    #[instrument(skip_all, fields(root = %self.area.root().display()))]
    pub fn generate(&self, request: &ArtifactRequest) -> SmithResult<GenerationReport> {
        self.check_area_is_separate()?;

        let LoadedModel {
            reference,
            inventory,
            cache_warning,
            ..
        } = self.loader.load(request)?;

        self.filesystem.remove_dir_all(self.area.root())?;
        self.filesystem.create_dir_all(self.area.root())?;

        for class in inventory.classes() {
            self.write_class(class)?;
        }

        info!(
            reference = %reference,
            classes = inventory.len(),
            "Generated model area"
        );

        Ok(GenerationReport {
            reference,
            root: self.area.root().to_path_buf(),
            classes: inventory.len(),
            packages: inventory.packages(),
            cache_warning,
        })
    }

    fn check_area_is_separate(&self) -> SmithResult<()> {
        let area = self.area.root();
        let artifacts = self.loader.cache().artifacts_root();
        if artifacts.starts_with(area) || area.starts_with(&artifacts) {
            return Err(SmithError::Configuration {
                message: format!(
                    "generated area '{}' overlaps the artifact cache '{}'; choose another generation.base_path",
                    area.display(),
                    artifacts.display()
                ),
            });
        }
        Ok(())
    }

    fn write_class(&self, class: &ModelClass) -> SmithResult<()> {
        let dir = self.area.class_dir(class)?;
        let java_package = format!(
            "{}.{}",
            self.layout.models_package(),
            model_dir_name(class.name())
        );
        let source = self
            .renderer
            .render(&RenderContext::resource(&ResourceData::for_class(
                class,
                java_package,
            ))?)?;

        self.filesystem.create_dir_all(&dir)?;
        let file = dir.join(format!("{}Resource.java", class.name()));
        debug!(class = %class, path = %file.display(), "Writing resource stub");
        self.filesystem.write_file(&file, &source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    use crate::application::{
        ApplicationError,
        ports::{MockArtifactSource, MockFilesystem, ModelParser},
        services::artifact_cache::ArtifactCache,
    };
    use crate::domain::{ModelInventory, RepositoryCoordinate, VersionRef};
    use crate::error::ErrorCategory;

    struct FixedParser(Vec<ModelClass>);

    impl ModelParser for FixedParser {
        fn parse(&self, _payload: &[u8]) -> SmithResult<ModelInventory> {
            Ok(ModelInventory::from_classes(self.0.clone()))
        }
    }

    /// Renders the class name, or fails for every template.
    struct StubRenderer {
        fail: bool,
    }

    impl TemplateRenderer for StubRenderer {
        fn render(&self, context: &RenderContext) -> SmithResult<String> {
            if self.fail {
                return Err(ApplicationError::RenderingFailed {
                    template: context.template().to_string(),
                    reason: "boom".into(),
                }
                .into());
            }
            Ok(format!("// {}", context.template()))
        }
    }

    fn request() -> ArtifactRequest {
        ArtifactRequest::new(
            RepositoryCoordinate::new("FINTmodels", "fint-informasjonsmodell").unwrap(),
            VersionRef::Named("v3.1.0".into()),
            "FINT-informasjonsmodell.xml",
        )
    }

    fn classes() -> Vec<ModelClass> {
        vec![
            ModelClass::new("Fagkode", "felles.kodeverk", vec![]),
            ModelClass::new("Elev", "utdanning.elev", vec![]),
        ]
    }

    /// Filesystem that serves a cached payload and records every mutation.
    fn recording_fs(ops: Arc<Mutex<Vec<String>>>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_bytes().returning(|_| Ok(b"<xmi/>".to_vec()));
        let log = ops.clone();
        fs.expect_remove_dir_all().returning(move |p| {
            log.lock().unwrap().push(format!("rm {}", p.display()));
            Ok(())
        });
        let log = ops.clone();
        fs.expect_create_dir_all().returning(move |p| {
            log.lock().unwrap().push(format!("mkdir {}", p.display()));
            Ok(())
        });
        fs.expect_write_file().returning(move |p, _| {
            ops.lock().unwrap().push(format!("write {}", p.display()));
            Ok(())
        });
        fs
    }

    fn generator(
        fs: MockFilesystem,
        classes: Vec<ModelClass>,
        renderer: StubRenderer,
        area: &str,
    ) -> ModelGenerator {
        let fs: Arc<dyn Filesystem> = Arc::new(fs);
        let mut source = MockArtifactSource::new();
        source.expect_fetch_artifact().times(0);
        let cache = ArtifactCache::new(Arc::new(source), fs.clone(), "/cache");
        ModelGenerator::new(
            ModelLoader::new(cache, Arc::new(FixedParser(classes))),
            Arc::new(renderer),
            fs,
            GeneratedArea::new(area),
            ProjectLayout::default(),
        )
    }

    #[test]
    fn wipes_area_then_writes_one_stub_per_class() {
        let ops = Arc::new(Mutex::new(Vec::new()));
        let report = generator(
            recording_fs(ops.clone()),
            classes(),
            StubRenderer { fail: false },
            "/cache/fint-model",
        )
        .generate(&request())
        .unwrap();

        assert_eq!(report.classes, 2);
        assert_eq!(report.packages, vec!["felles.kodeverk", "utdanning.elev"]);
        assert_eq!(report.root, Path::new("/cache/fint-model"));
        assert_eq!(
            *ops.lock().unwrap(),
            vec![
                "rm /cache/fint-model",
                "mkdir /cache/fint-model",
                "mkdir /cache/fint-model/felles/kodeverk/fagkode",
                "write /cache/fint-model/felles/kodeverk/fagkode/FagkodeResource.java",
                "mkdir /cache/fint-model/utdanning/elev/elev",
                "write /cache/fint-model/utdanning/elev/elev/ElevResource.java",
            ]
        );
    }

    #[test]
    fn renderer_error_propagates_before_any_write() {
        let ops = Arc::new(Mutex::new(Vec::new()));
        let err = generator(
            recording_fs(ops.clone()),
            classes(),
            StubRenderer { fail: true },
            "/cache/fint-model",
        )
        .generate(&request())
        .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Template);
        assert!(!ops.lock().unwrap().iter().any(|op| op.starts_with("write")));
    }

    #[test]
    fn area_overlapping_the_cache_is_refused() {
        for area in ["/cache", "/cache/artifacts", "/cache/artifacts/v3.1.0"] {
            let mut fs = MockFilesystem::new();
            fs.expect_remove_dir_all().times(0);
            fs.expect_exists().times(0);
            let err = generator(fs, classes(), StubRenderer { fail: false }, area)
                .generate(&request())
                .unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Configuration, "area {area}");
        }
    }

    #[test]
    fn class_that_would_leave_the_area_is_rejected() {
        let ops = Arc::new(Mutex::new(Vec::new()));
        let err = generator(
            recording_fs(ops.clone()),
            vec![ModelClass::new("../../../../escaped", "felles", vec![])],
            StubRenderer { fail: false },
            "/cache/fint-model",
        )
        .generate(&request())
        .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::MalformedArtifact);
        assert!(!ops.lock().unwrap().iter().any(|op| op.contains("escaped")));
    }
}
