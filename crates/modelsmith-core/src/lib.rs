//! Modelsmith Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for modelsmith,
//! a generator that turns a versioned information model into Java model
//! sources and scaffolds consumer projects around them.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          modelsmith-cli (CLI)           │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ArtifactCache, ModelGenerator,         │
//! │  ScaffoldService, CatalogService)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ArtifactSource, ModelParser, Renderer, │
//! │  Filesystem, RepositoryInitializer)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    modelsmith-adapters (Infrastructure) │
//! │ (GitHubSource, XmiParser, JinjaRenderer)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ModelClass, ProjectLayout, TextPatch)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modelsmith_core::prelude::*;
//!
//! let cache = ArtifactCache::new(source, filesystem.clone(), "/tmp/modelsmith");
//! let loader = ModelLoader::new(cache, parser);
//! let generator = ModelGenerator::new(loader, renderer, filesystem, area, ProjectLayout::default());
//! let report = generator.generate(&request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArtifactCache, ArtifactRequest, CatalogService, ModelGenerator, ModelLoader,
        ScaffoldService, ScaffoldSettings, SetupReport, SetupRequest,
        ports::{
            ArtifactSource, Filesystem, ModelParser, RepositoryInitializer, SkeletonProvider,
            TemplateRenderer,
        },
    };
    pub use crate::domain::{
        GeneratedArea, Model, ModelClass, ModelInventory, ProjectLayout, ProjectStructure,
        RenderContext, RepositoryCoordinate, Signature, VersionRef,
    };
    pub use crate::error::{SmithError, SmithResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
