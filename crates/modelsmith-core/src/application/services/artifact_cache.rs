//! Artifact cache - resolves a versioned artifact to local bytes.
//!
//! The cache lives under an explicit root directory handed in at
//! construction. Payloads are stored in their own subtree,
//! `<root>/artifacts/<reference>/<cache key>`, so sibling directories under
//! the same root (the generated area) never share names with them. Entries
//! are only ever replaced by a forced refresh; nothing expires on its own.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{ArtifactSource, Filesystem},
    domain::{RepositoryCoordinate, VersionRef},
    error::{SmithError, SmithResult},
};

/// Subdirectory of the cache root holding downloaded payloads.
pub const ARTIFACTS_DIR: &str = "artifacts";

/// What to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRequest {
    pub repository: RepositoryCoordinate,
    pub reference: VersionRef,
    /// Path of the artifact inside the repository.
    pub artifact_path: String,
    /// Name the payload is stored under locally.
    pub cache_key: String,
    pub force_refresh: bool,
}

impl ArtifactRequest {
    /// A request whose cache key is the artifact's file name.
    pub fn new(
        repository: RepositoryCoordinate,
        reference: VersionRef,
        artifact_path: impl Into<String>,
    ) -> Self {
        let artifact_path = artifact_path.into();
        let cache_key = artifact_path
            .rsplit('/')
            .next()
            .unwrap_or(artifact_path.as_str())
            .to_string();
        Self {
            repository,
            reference,
            artifact_path,
            cache_key,
            force_refresh: false,
        }
    }

    pub fn with_cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = cache_key.into();
        self
    }

    pub fn force_refresh(mut self, force: bool) -> Self {
        self.force_refresh = force;
        self
    }

    /// The same request pinned to a concrete reference.
    pub fn pinned(&self, reference: impl Into<String>) -> Self {
        Self {
            reference: VersionRef::Named(reference.into()),
            ..self.clone()
        }
    }
}

/// Where a resolved payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOrigin {
    Cache,
    Remote,
}

/// A resolved artifact payload.
#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    /// The concrete reference (never the latest sentinel).
    pub reference: String,
    pub payload: Vec<u8>,
    pub origin: ArtifactOrigin,
    pub cache_path: PathBuf,
    /// Set when the payload is usable but the cache is now inconsistent
    /// (write failed, or a forced refresh fell back to a stale copy).
    pub cache_warning: Option<SmithError>,
}

/// Local cache in front of an [`ArtifactSource`].
pub struct ArtifactCache {
    source: Arc<dyn ArtifactSource>,
    filesystem: Arc<dyn Filesystem>,
    cache_root: PathBuf,
}

impl ArtifactCache {
    pub fn new(
        source: Arc<dyn ArtifactSource>,
        filesystem: Arc<dyn Filesystem>,
        cache_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            filesystem,
            cache_root: cache_root.into(),
        }
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Directory every cached payload lives under.
    pub fn artifacts_root(&self) -> PathBuf {
        self.cache_root.join(ARTIFACTS_DIR)
    }

    pub fn source(&self) -> &Arc<dyn ArtifactSource> {
        &self.source
    }

    /// Turn the latest sentinel into a concrete tag.
    pub fn resolve_reference(
        &self,
        repository: &RepositoryCoordinate,
        reference: &VersionRef,
    ) -> SmithResult<String> {
        match reference {
            VersionRef::Named(name) => Ok(name.clone()),
            VersionRef::Latest => {
                let tag = self.source.latest_tag(repository)?;
                info!(%repository, tag = %tag, "Resolved latest version");
                Ok(tag)
            }
        }
    }

    /// Deterministic local path for `(reference, cache_key)`.
    pub fn cache_path(&self, reference: &str, cache_key: &str) -> PathBuf {
        self.artifacts_root()
            .join(sanitize_segment(reference))
            .join(sanitize_segment(cache_key))
    }

    /// Resolve `request` to bytes, hitting the network only on a miss or a
    /// forced refresh.
    #[instrument(
        skip_all,
        fields(
            repository = %request.repository,
            reference = %request.reference,
            force = request.force_refresh
        )
    )]
    pub fn resolve(&self, request: &ArtifactRequest) -> SmithResult<ResolvedArtifact> {
        let reference = self.resolve_reference(&request.repository, &request.reference)?;
        let cache_path = self.cache_path(&reference, &request.cache_key);

        if !request.force_refresh && self.filesystem.exists(&cache_path) {
            match self.filesystem.read_bytes(&cache_path) {
                Ok(payload) => {
                    debug!(path = %cache_path.display(), bytes = payload.len(), "Cache hit");
                    return Ok(ResolvedArtifact {
                        reference,
                        payload,
                        origin: ArtifactOrigin::Cache,
                        cache_path,
                        cache_warning: None,
                    });
                }
                Err(e) => warn!(error = %e, "Cached artifact unreadable, fetching again"),
            }
        }

        let fetched =
            self.source
                .fetch_artifact(&request.repository, &reference, &request.artifact_path);

        let payload = match fetched {
            Ok(payload) => payload,
            Err(fetch_error) => {
                return self.fall_back_to_cache(reference, cache_path, fetch_error);
            }
        };

        info!(bytes = payload.len(), reference = %reference, "Artifact fetched");
        let cache_warning = self.persist(&cache_path, &payload).err();
        if let Some(e) = &cache_warning {
            warn!(error = %e, path = %cache_path.display(), "Could not write artifact cache");
        }

        Ok(ResolvedArtifact {
            reference,
            payload,
            origin: ArtifactOrigin::Remote,
            cache_path,
            cache_warning,
        })
    }

    fn persist(&self, cache_path: &Path, payload: &[u8]) -> SmithResult<()> {
        if let Some(parent) = cache_path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_bytes(cache_path, payload)
    }

    fn fall_back_to_cache(
        &self,
        reference: String,
        cache_path: PathBuf,
        fetch_error: SmithError,
    ) -> SmithResult<ResolvedArtifact> {
        if !self.filesystem.exists(&cache_path) {
            return Err(fetch_error);
        }
        let payload = self
            .filesystem
            .read_bytes(&cache_path)
            .map_err(|_| fetch_error.clone())?;

        warn!(error = %fetch_error, "Refresh failed, using cached artifact");
        Ok(ResolvedArtifact {
            reference,
            payload,
            origin: ArtifactOrigin::Cache,
            cache_path,
            cache_warning: Some(fetch_error),
        })
    }
}

/// Make a reference or key safe to use as one path segment.
///
/// Separators and `%` are percent-encoded, so distinct inputs never share an
/// entry (`feature/x` and `feature_x` stay apart). The dot names are encoded
/// whole.
fn sanitize_segment(segment: &str) -> String {
    match segment {
        "" => return "%".to_string(),
        "." => return "%2E".to_string(),
        ".." => return "%2E%2E".to_string(),
        _ => {}
    }
    let mut encoded = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            '/' => encoded.push_str("%2F"),
            '\\' => encoded.push_str("%5C"),
            ':' => encoded.push_str("%3A"),
            c => encoded.push(c),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{MockArtifactSource, MockFilesystem},
    };

    fn repo() -> RepositoryCoordinate {
        RepositoryCoordinate::new("FINTmodels", "fint-informasjonsmodell").unwrap()
    }

    fn request(reference: &str) -> ArtifactRequest {
        ArtifactRequest::new(repo(), VersionRef::parse(reference), "FINT-informasjonsmodell.xml")
    }

    fn retrieval_error() -> SmithError {
        ApplicationError::RetrievalFailed {
            what: "artifact".into(),
            repository: "FINTmodels/fint-informasjonsmodell".into(),
            reason: "offline".into(),
        }
        .into()
    }

    fn cache(source: MockArtifactSource, fs: MockFilesystem) -> ArtifactCache {
        ArtifactCache::new(Arc::new(source), Arc::new(fs), "/cache")
    }

    #[test]
    fn cache_key_defaults_to_file_name() {
        let req = ArtifactRequest::new(repo(), VersionRef::Latest, "model/FINT.xml");
        assert_eq!(req.cache_key, "FINT.xml");
    }

    #[test]
    fn cache_hit_never_fetches() {
        let mut source = MockArtifactSource::new();
        source.expect_fetch_artifact().times(0);
        source.expect_latest_tag().times(0);

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_bytes()
            .returning(|_| Ok(b"<cached/>".to_vec()));
        fs.expect_write_bytes().times(0);

        let resolved = cache(source, fs).resolve(&request("v3.1.0")).unwrap();
        assert_eq!(resolved.payload, b"<cached/>");
        assert_eq!(resolved.origin, ArtifactOrigin::Cache);
        assert_eq!(
            resolved.cache_path,
            PathBuf::from("/cache/artifacts/v3.1.0/FINT-informasjonsmodell.xml")
        );
    }

    #[test]
    fn force_refresh_fetches_and_overwrites_existing_entry() {
        let mut source = MockArtifactSource::new();
        source
            .expect_fetch_artifact()
            .times(1)
            .returning(|_, _, _| Ok(b"<fresh/>".to_vec()));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_bytes().times(0);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_bytes()
            .withf(|path, bytes| {
                path == Path::new("/cache/artifacts/v3.1.0/FINT-informasjonsmodell.xml")
                    && bytes == b"<fresh/>".as_slice()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let resolved = cache(source, fs)
            .resolve(&request("v3.1.0").force_refresh(true))
            .unwrap();
        assert_eq!(resolved.payload, b"<fresh/>");
        assert_eq!(resolved.origin, ArtifactOrigin::Remote);
        assert!(resolved.cache_warning.is_none());
    }

    #[test]
    fn miss_fetches_and_persists() {
        let mut source = MockArtifactSource::new();
        source
            .expect_fetch_artifact()
            .withf(|_, reference, path| reference == "v3.1.0" && path == "FINT-informasjonsmodell.xml")
            .times(1)
            .returning(|_, _, _| Ok(b"<xmi/>".to_vec()));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all()
            .withf(|path| path == Path::new("/cache/artifacts/v3.1.0"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_bytes().times(1).returning(|_, _| Ok(()));

        let resolved = cache(source, fs).resolve(&request("v3.1.0")).unwrap();
        assert_eq!(resolved.origin, ArtifactOrigin::Remote);
    }

    #[test]
    fn latest_is_resolved_before_lookup() {
        let mut source = MockArtifactSource::new();
        source
            .expect_latest_tag()
            .times(1)
            .returning(|_| Ok("v3.2.0".into()));
        source.expect_fetch_artifact().times(0);

        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|path| path.starts_with("/cache/artifacts/v3.2.0"))
            .return_const(true);
        fs.expect_read_bytes().returning(|_| Ok(Vec::new()));

        let resolved = cache(source, fs).resolve(&request("latest")).unwrap();
        assert_eq!(resolved.reference, "v3.2.0");
    }

    #[test]
    fn fetch_failure_without_cache_is_retrieval_error() {
        let mut source = MockArtifactSource::new();
        source
            .expect_fetch_artifact()
            .returning(|_, _, _| Err(retrieval_error()));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);

        let err = cache(source, fs).resolve(&request("v1")).unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::Retrieval);
    }

    #[test]
    fn forced_fetch_failure_falls_back_to_cached_copy() {
        let mut source = MockArtifactSource::new();
        source
            .expect_fetch_artifact()
            .returning(|_, _, _| Err(retrieval_error()));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_read_bytes().returning(|_| Ok(b"<stale/>".to_vec()));

        let resolved = cache(source, fs)
            .resolve(&request("v1").force_refresh(true))
            .unwrap();
        assert_eq!(resolved.payload, b"<stale/>");
        assert!(resolved.cache_warning.is_some());
    }

    #[test]
    fn cache_write_failure_still_returns_payload() {
        let mut source = MockArtifactSource::new();
        source
            .expect_fetch_artifact()
            .returning(|_, _, _| Ok(b"<xmi/>".to_vec()));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|path| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });

        let resolved = cache(source, fs).resolve(&request("v1")).unwrap();
        assert_eq!(resolved.payload, b"<xmi/>");
        assert!(matches!(
            resolved.cache_warning,
            Some(SmithError::Application(ApplicationError::FilesystemError { .. }))
        ));
    }

    #[test]
    fn branch_names_stay_inside_cache_root() {
        let c = cache(MockArtifactSource::new(), MockFilesystem::new());
        assert_eq!(
            c.cache_path("feature/new-model", "model.xml"),
            PathBuf::from("/cache/artifacts/feature%2Fnew-model/model.xml")
        );
        assert_eq!(c.cache_path("..", "x"), PathBuf::from("/cache/artifacts/%2E%2E/x"));
        assert_eq!(c.cache_path("", "x"), PathBuf::from("/cache/artifacts/%/x"));
    }

    #[test]
    fn similar_references_get_distinct_entries() {
        let c = cache(MockArtifactSource::new(), MockFilesystem::new());
        let slashed = c.cache_path("feature/x", "model.xml");
        let underscored = c.cache_path("feature_x", "model.xml");
        assert_ne!(slashed, underscored);
        assert_ne!(c.cache_path("a:b", "k"), c.cache_path("a%3Ab", "k"));
        assert_ne!(c.cache_path("a\\b", "k"), c.cache_path("a/b", "k"));
    }

    #[test]
    fn payloads_live_under_artifacts_subtree() {
        let c = cache(MockArtifactSource::new(), MockFilesystem::new());
        assert_eq!(c.artifacts_root(), PathBuf::from("/cache/artifacts"));
        assert!(c.cache_path("fint-model", "model.xml").starts_with(c.artifacts_root()));
    }
}
