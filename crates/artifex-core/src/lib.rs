//! Artifex Core - Metadata-driven domain object engine
//!
//! This crate provides the foundational components of Artifex:
//! - Type Catalog resolving external type names into cached descriptors
//! - Object Factory with validated create/save/delete/get semantics
//! - Object Inspector producing bounded, cycle-safe views of instances
//! - Pattern Engine materializing typed object trees from templates
//! - Provider boundary traits for the external metadata/storage backend
//! - Canonical error and logging facilities
//!
//! Persistence, wire transport, and UI rendering live outside this crate;
//! the server crate composes these components behind a request router.

pub mod catalog;
pub mod errors;
pub mod factory;
pub mod inspector;
pub mod logging_facility;
pub mod model;
pub mod pattern;
pub mod provider;

// Re-export commonly used types
pub use catalog::TypeCatalog;
pub use errors::{ArtifexError, AxError, AxErrorKind, Result};
pub use factory::{CreateOutcome, ObjectFactory};
pub use inspector::{InspectLimits, InspectMode, Inspection, Inspector};
pub use model::{
    CollectionDescriptor, ObjectInstance, ParameterSpec, PatternNode, PropertyDescriptor,
    PropertyRestriction, TypeDescriptor, ValueKind,
};
pub use pattern::{BuildReport, PatternBuilder};
pub use provider::{MetadataProvider, PatternLibrary, StorageProvider};
