pub mod common;
pub mod insertion;
pub mod layout;
pub mod model;
pub mod project_structure;
pub mod template;

pub use crate::domain::DomainError;
pub use model::{FieldRef, Model, ModelClass, ModelInventory};
pub use project_structure::ProjectStructure;
