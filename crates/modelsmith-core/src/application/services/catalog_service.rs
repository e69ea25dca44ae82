//! Catalog Service - what versions of the model exist.
//!
//! Separated from the loader and scaffolder: listing tags and branches never
//! touches the cache.

use std::sync::Arc;

use crate::{
    application::ports::ArtifactSource, domain::RepositoryCoordinate, error::SmithResult,
};

/// Service for version listings.
pub struct CatalogService {
    source: Arc<dyn ArtifactSource>,
    repository: RepositoryCoordinate,
}

impl CatalogService {
    pub fn new(source: Arc<dyn ArtifactSource>, repository: RepositoryCoordinate) -> Self {
        Self { source, repository }
    }

    pub fn repository(&self) -> &RepositoryCoordinate {
        &self.repository
    }

    /// All tags of the model repository.
    pub fn tags(&self) -> SmithResult<Vec<String>> {
        self.source.list_tags(&self.repository)
    }

    /// All branches of the model repository.
    pub fn branches(&self) -> SmithResult<Vec<String>> {
        self.source.list_branches(&self.repository)
    }

    /// The tag `latest` resolves to.
    pub fn latest(&self) -> SmithResult<String> {
        self.source.latest_tag(&self.repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockArtifactSource;

    #[test]
    fn listings_are_scoped_to_the_configured_repository() {
        let mut source = MockArtifactSource::new();
        source
            .expect_list_tags()
            .withf(|repo| repo.to_string() == "FINTmodels/fint-informasjonsmodell")
            .returning(|_| Ok(vec!["v3.1.0".into(), "v3.0.0".into()]));
        source
            .expect_list_branches()
            .returning(|_| Ok(vec!["master".into()]));

        let catalog = CatalogService::new(
            Arc::new(source),
            "FINTmodels/fint-informasjonsmodell".parse().unwrap(),
        );

        assert_eq!(catalog.tags().unwrap(), vec!["v3.1.0", "v3.0.0"]);
        assert_eq!(catalog.branches().unwrap(), vec!["master"]);
    }
}
