// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for modelsmith.
//!
//! This module contains pure logic with no I/O. Fetching, parsing,
//! templating, and writing are handled via ports (traits) defined in the
//! application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or external calls
//! - **Immutable entities**: parsed classes never change after creation
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    common::{Permissions, RelativePath, is_path_segment},
    insertion::{InsertionPoint, MODELS_MARKER, PatchOutcome, TextPatch},
    layout::{
        GeneratedArea, PERSON_COMPONENT, PERSON_PACKAGE, ProjectLayout, model_dir_name,
        project_dir_name,
    },
    model::{FieldRef, Model, ModelClass, ModelInventory, distinct_packages},
    project_structure::{DirectoryToCreate, FileContent, FileToWrite, FsEntry, ProjectStructure},
    template::{
        ConstantsData, LinkMapperData, PropertiesData, RenderContext, ResourceData,
        ResourceField, RestEndpointsData, TemplateName,
    },
};

pub use error::DomainError;

pub use value_objects::{LATEST, RepositoryCoordinate, Signature, VersionRef};

pub use validation::DomainValidator;
