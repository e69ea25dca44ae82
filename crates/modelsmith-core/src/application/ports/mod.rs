//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `modelsmith-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations, tree copies, directory listing
//!   - `ArtifactSource`: Tags, branches, and artifact downloads
//!   - `ModelParser`: Artifact payload to class inventory
//!   - `TemplateRenderer`: Named template rendering
//!   - `RepositoryInitializer`: Init, stage, commit
//!   - `SkeletonProvider`: Base project tree
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    ArtifactSource, Filesystem, ModelParser, RepositoryInitializer, SkeletonProvider,
    TemplateRenderer,
};

#[cfg(test)]
pub use output::{MockArtifactSource, MockFilesystem, MockRepositoryInitializer};
