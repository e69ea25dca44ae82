//! Model loader - artifact cache plus parser.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ports::ModelParser,
        services::artifact_cache::{ArtifactCache, ArtifactOrigin, ArtifactRequest},
    },
    domain::ModelInventory,
    error::{SmithError, SmithResult},
};

/// A parsed model and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub reference: String,
    pub origin: ArtifactOrigin,
    pub inventory: ModelInventory,
    pub cache_warning: Option<SmithError>,
}

/// Resolves the artifact and parses it into a class inventory.
pub struct ModelLoader {
    cache: ArtifactCache,
    parser: Arc<dyn ModelParser>,
}

impl ModelLoader {
    pub fn new(cache: ArtifactCache, parser: Arc<dyn ModelParser>) -> Self {
        Self { cache, parser }
    }

    pub fn cache(&self) -> &ArtifactCache {
        &self.cache
    }

    #[instrument(skip_all, fields(reference = %request.reference))]
    pub fn load(&self, request: &ArtifactRequest) -> SmithResult<LoadedModel> {
        let artifact = self.cache.resolve(request)?;
        let inventory = self.parser.parse(&artifact.payload)?;

        info!(
            reference = %artifact.reference,
            classes = inventory.len(),
            "Model parsed"
        );

        Ok(LoadedModel {
            reference: artifact.reference,
            origin: artifact.origin,
            inventory,
            cache_warning: artifact.cache_warning,
        })
    }

    /// Distinct package names of the model, first-seen order.
    pub fn list_packages(&self, request: &ArtifactRequest) -> SmithResult<Vec<String>> {
        Ok(self.load(request)?.inventory.packages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockArtifactSource, MockFilesystem};
    use crate::domain::{DomainError, ModelClass, RepositoryCoordinate, VersionRef};

    /// Parser stand-in: one class per line, `package:Name`.
    struct LineParser;

    impl ModelParser for LineParser {
        fn parse(&self, payload: &[u8]) -> SmithResult<ModelInventory> {
            let text = std::str::from_utf8(payload).map_err(|e| DomainError::MalformedArtifact {
                reason: e.to_string(),
            })?;
            Ok(ModelInventory::from_classes(text.lines().filter_map(|l| {
                l.split_once(':')
                    .map(|(package, name)| ModelClass::new(name, package, vec![]))
            })))
        }
    }

    fn loader(payload: &'static [u8]) -> ModelLoader {
        let source = MockArtifactSource::new();
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_bytes().returning(move |_| Ok(payload.to_vec()));
        let cache = ArtifactCache::new(Arc::new(source), Arc::new(fs), "/cache");
        ModelLoader::new(cache, Arc::new(LineParser))
    }

    fn request() -> ArtifactRequest {
        ArtifactRequest::new(
            RepositoryCoordinate::new("o", "r").unwrap(),
            VersionRef::parse("v1"),
            "model.xml",
        )
    }

    #[test]
    fn list_packages_is_distinct_in_first_seen_order() {
        let packages = loader(b"a.b:X\na.c:Y\na.b:Z")
            .list_packages(&request())
            .unwrap();
        assert_eq!(packages, vec!["a.b", "a.c"]);
    }

    #[test]
    fn parser_errors_propagate() {
        let err = loader(&[0xff, 0xfe]).load(&request()).unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::MalformedArtifact);
    }
}
