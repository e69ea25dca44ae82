//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate the model" or "set up a consumer".

pub mod artifact_cache;
pub mod catalog_service;
pub mod model_generator;
pub mod model_loader;
pub mod scaffold_service;

pub use artifact_cache::{ArtifactCache, ArtifactOrigin, ArtifactRequest, ResolvedArtifact};
pub use catalog_service::CatalogService;
pub use model_generator::{GenerationReport, ModelGenerator};
pub use model_loader::{LoadedModel, ModelLoader};
pub use scaffold_service::{ScaffoldService, ScaffoldSettings, SetupReport, SetupRequest};
