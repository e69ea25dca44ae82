//! Application layer for modelsmith.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ArtifactCache, ModelGenerator, ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ArtifactCache, ArtifactOrigin, ArtifactRequest, CatalogService, GenerationReport,
    LoadedModel, ModelGenerator, ModelLoader, ResolvedArtifact, ScaffoldService,
    ScaffoldSettings, SetupReport, SetupRequest,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    ArtifactSource, Filesystem, ModelParser, RepositoryInitializer, SkeletonProvider,
    TemplateRenderer,
};

pub use error::ApplicationError;
