//! Type Catalog - registry translating external type names into descriptors
//!
//! Descriptors and property details are lazily populated and memoized for
//! the life of the process. Caches are read-mostly: concurrent readers
//! never block each other, and a miss race may recompute redundantly —
//! computation is idempotent and cheap relative to serializing access.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::errors::{ArtifexError, Result};
use crate::model::TypeDescriptor;
use crate::provider::{MetadataProvider, PropertyDetail};

/// Suffix marking generated collection kinds, hidden from listings
const COLLECTION_SUFFIX: &str = "Collection";

/// Prefix marking abstract base kinds, hidden from listings
const BASE_PREFIX: &str = "Base";

/// Registry resolving type names to immutable, cached descriptors
///
/// Constructed once at startup with an explicit lifecycle and injected
/// into dependent components; there is no global accessor.
pub struct TypeCatalog {
    provider: Arc<dyn MetadataProvider>,
    descriptors: RwLock<HashMap<String, Arc<TypeDescriptor>>>,
    details: RwLock<HashMap<String, Arc<HashMap<String, PropertyDetail>>>>,
}

impl TypeCatalog {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            descriptors: RwLock::new(HashMap::new()),
            details: RwLock::new(HashMap::new()),
        }
    }

    /// List constructible, non-internal kinds, sorted by name
    ///
    /// Helper kinds are filtered out: anything the provider marks internal,
    /// names carrying the generated `Collection` suffix, `Base`-prefixed
    /// abstract kinds, and kinds without a zero-argument constructor
    /// equivalent.
    pub fn list_types(&self) -> Result<Vec<String>> {
        let summaries = self.provider.type_names()?;
        let mut names: Vec<String> = summaries
            .into_iter()
            .filter(|s| {
                s.constructible
                    && !s.internal
                    && !s.name.ends_with(COLLECTION_SUFFIX)
                    && !s.name.starts_with(BASE_PREFIX)
            })
            .map(|s| s.name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Resolve one kind to its cached descriptor
    ///
    /// # Errors
    /// * `TypeNotFound` - the provider does not know the kind
    /// * `ProviderUnavailable` - the backend is unreachable
    pub fn get_type(&self, name: &str) -> Result<Arc<TypeDescriptor>> {
        if let Some(cached) = self
            .descriptors
            .read()
            .expect("descriptor cache poisoned")
            .get(name)
        {
            return Ok(Arc::clone(cached));
        }

        // Miss: resolve outside any lock; a concurrent miss may do the
        // same work and the first insert wins.
        let resolved = self
            .provider
            .resolve_type(name)?
            .ok_or_else(|| ArtifexError::TypeNotFound {
                type_name: name.to_string(),
            })?;
        tracing::debug!(type_name = name, "catalog_descriptor_populated");

        let mut cache = self.descriptors.write().expect("descriptor cache poisoned");
        let entry = cache
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(resolved));
        Ok(Arc::clone(entry))
    }

    /// Display details for every property of a kind, batched and cached
    ///
    /// The underlying provider lookup returns all properties in a single
    /// round trip; after the first call per type the cache answers, so
    /// per-property round trips never occur.
    pub fn property_details(&self, type_name: &str) -> Result<Arc<HashMap<String, PropertyDetail>>> {
        if let Some(cached) = self
            .details
            .read()
            .expect("detail cache poisoned")
            .get(type_name)
        {
            return Ok(Arc::clone(cached));
        }

        let fetched = self.provider.property_details(type_name)?;
        tracing::debug!(
            type_name = type_name,
            count = fetched.len(),
            "catalog_property_details_populated"
        );
        let by_name: HashMap<String, PropertyDetail> = fetched
            .into_iter()
            .map(|d| (d.property.clone(), d))
            .collect();

        let mut cache = self.details.write().expect("detail cache poisoned");
        let entry = cache
            .entry(type_name.to_string())
            .or_insert_with(|| Arc::new(by_name));
        Ok(Arc::clone(entry))
    }

    /// Candidate values of a backend-registered enum, if it exists
    pub fn enum_candidates(&self, enum_name: &str) -> Result<Option<Vec<String>>> {
        self.provider.enum_values(enum_name)
    }
}
