//! Provider boundary for the external metadata/storage backend
//!
//! The backend owns the authoritative schema for every object kind and the
//! persistence of instances; this crate consumes it strictly through the
//! traits below. All methods are synchronous — callers on async paths
//! offload invocations to the blocking pool. An unreachable backend must
//! surface as `ArtifexError::ProviderUnavailable`, never as a panic.

pub mod memory;

use crate::errors::Result;
use crate::model::{ObjectInstance, PatternNode, TypeDescriptor};
use serde::{Deserialize, Serialize};

pub use memory::{InMemoryBackend, SeedFile};

/// One entry of the provider's raw type listing, before catalog filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub name: String,
    pub constructible: bool,
    pub internal: bool,
}

/// Display metadata for one property, from the batched detail lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetail {
    pub property: String,
    pub label: Option<String>,
    pub description: Option<String>,
}

/// Read-side of the external backend: type schemas and enum sets
pub trait MetadataProvider: Send + Sync {
    /// Raw, unfiltered listing of every kind the backend knows
    fn type_names(&self) -> Result<Vec<TypeSummary>>;

    /// Resolve one kind to its full schema; `None` when unknown
    fn resolve_type(&self, name: &str) -> Result<Option<TypeDescriptor>>;

    /// Display details for every property of a kind, in one batched call
    ///
    /// This is the expensive round trip the catalog caches; implementations
    /// must return details for all properties at once.
    fn property_details(&self, type_name: &str) -> Result<Vec<PropertyDetail>>;

    /// Candidate values of a backend-registered enum; `None` when unknown
    fn enum_values(&self, enum_name: &str) -> Result<Option<Vec<String>>>;
}

/// Write-side of the external backend: instance persistence
///
/// Mutation ordering is the backend's concern; this engine passes calls
/// through without write-ordering guarantees of its own.
pub trait StorageProvider: Send + Sync {
    /// Load a persisted instance; `None` when absent
    fn load(&self, type_name: &str, name: &str) -> Result<Option<ObjectInstance>>;

    /// Persist an instance, overwriting any previous version
    fn store(&self, type_name: &str, name: &str, instance: &ObjectInstance) -> Result<bool>;

    /// Remove a persisted instance; false when it was absent
    fn delete(&self, type_name: &str, name: &str) -> Result<bool>;
}

/// External pattern library: templates plus the structural validator
pub trait PatternLibrary: Send + Sync {
    /// Fetch a pattern tree by name and optional version
    ///
    /// When the requested version is absent the first available version is
    /// substituted (preserved legacy negotiation; implementations log it).
    fn pattern(&self, name: &str, version: Option<&str>) -> Result<Option<PatternNode>>;

    /// Final structural validation of a built container against the
    /// pattern's full rule set; owned by the pattern source
    fn validate(&self, name: &str, container: &ObjectInstance) -> Result<bool>;
}
