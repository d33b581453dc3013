//! In-memory backend implementing all three provider traits
//!
//! HashMap-backed reference implementation used by tests, demos, and the
//! CLI `serve` command. Seedable programmatically or from a JSON seed
//! file. The `available` toggle lets tests simulate an unreachable
//! backend; `detail_call_count` counts batched property-detail round
//! trips so caching behavior can be asserted.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::errors::{ArtifexError, Result};
use crate::model::{ObjectInstance, PatternNode, TypeDescriptor, CHILD_COLLECTION};
use crate::provider::{MetadataProvider, PatternLibrary, PropertyDetail, StorageProvider, TypeSummary};

/// One versioned pattern entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternVersion {
    pub version: String,
    pub root: PatternNode,
}

/// On-disk seed document for the in-memory backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub patterns: BTreeMap<String, Vec<PatternVersion>>,
}

/// In-memory metadata, storage, and pattern backend
pub struct InMemoryBackend {
    types: RwLock<BTreeMap<String, TypeDescriptor>>,
    enums: RwLock<BTreeMap<String, Vec<String>>>,
    objects: RwLock<BTreeMap<String, ObjectInstance>>,
    patterns: RwLock<BTreeMap<String, Vec<PatternVersion>>>,
    available: AtomicBool,
    detail_calls: AtomicUsize,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// Create an empty, reachable backend
    pub fn new() -> Self {
        Self {
            types: RwLock::new(BTreeMap::new()),
            enums: RwLock::new(BTreeMap::new()),
            objects: RwLock::new(BTreeMap::new()),
            patterns: RwLock::new(BTreeMap::new()),
            available: AtomicBool::new(true),
            detail_calls: AtomicUsize::new(0),
        }
    }

    /// Build a backend from a parsed seed document
    pub fn from_seed(seed: SeedFile) -> Self {
        let backend = Self::new();
        for descriptor in seed.types {
            backend.register_type(descriptor);
        }
        for (name, values) in seed.enums {
            backend.register_enum(name, values);
        }
        for (name, versions) in seed.patterns {
            for v in versions {
                backend.register_pattern(&name, &v.version, v.root);
            }
        }
        backend
    }

    /// Build a backend from a JSON seed file on disk
    pub fn from_seed_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| ArtifexError::Internal {
            message: format!("cannot read seed file {}: {}", path.display(), e),
        })?;
        let seed: SeedFile = serde_json::from_slice(&bytes)?;
        Ok(Self::from_seed(seed))
    }

    /// Register (or replace) a type schema
    pub fn register_type(&self, descriptor: TypeDescriptor) {
        self.types
            .write()
            .expect("types lock poisoned")
            .insert(descriptor.name.clone(), descriptor);
    }

    /// Register (or replace) an enum candidate set
    pub fn register_enum(&self, name: impl Into<String>, values: Vec<String>) {
        self.enums
            .write()
            .expect("enums lock poisoned")
            .insert(name.into(), values);
    }

    /// Register one version of a pattern
    pub fn register_pattern(&self, name: &str, version: &str, root: PatternNode) {
        self.patterns
            .write()
            .expect("patterns lock poisoned")
            .entry(name.to_string())
            .or_default()
            .push(PatternVersion {
                version: version.to_string(),
                root,
            });
    }

    /// Toggle reachability; when false every trait method fails typed
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of batched property-detail round trips served so far
    pub fn detail_call_count(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Number of persisted objects (test helper)
    pub fn object_count(&self) -> usize {
        self.objects.read().expect("objects lock poisoned").len()
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ArtifexError::ProviderUnavailable {
                reason: "backend offline".to_string(),
            })
        }
    }

    fn object_key(type_name: &str, name: &str) -> String {
        format!("{}/{}", type_name, name)
    }

    /// Check one pattern level against a container, consuming matched
    /// elements so sibling nodes of the same type bind distinct elements.
    fn node_satisfied(node: &PatternNode, container: &ObjectInstance) -> bool {
        if node.is_container() {
            let restrictions_hold = node
                .restrictions
                .iter()
                .all(|r| container.get_property(&r.property) == Some(&r.value));
            return restrictions_hold
                && Self::children_satisfied(&node.children, container);
        }
        // A non-container node at the root needs a wrapping container view
        Self::children_satisfied(std::slice::from_ref(node), container)
    }

    fn children_satisfied(children: &[PatternNode], container: &ObjectInstance) -> bool {
        let elements = container.collection(CHILD_COLLECTION).unwrap_or(&[]);
        let mut consumed: HashSet<&str> = HashSet::new();
        for child in children {
            if child.is_container() {
                // Nested container applies to the same element level
                if !Self::node_satisfied(child, container) {
                    return false;
                }
                continue;
            }
            let matched = elements.iter().find(|e| {
                !consumed.contains(e.handle.as_str())
                    && e.type_name == child.type_name
                    && child
                        .restrictions
                        .iter()
                        .all(|r| e.get_property(&r.property) == Some(&r.value))
                    && Self::children_satisfied(&child.children, e)
            });
            match matched {
                Some(e) => {
                    consumed.insert(e.handle.as_str());
                }
                None => return false,
            }
        }
        true
    }
}

impl MetadataProvider for InMemoryBackend {
    fn type_names(&self) -> Result<Vec<TypeSummary>> {
        self.check_available()?;
        let types = self.types.read().expect("types lock poisoned");
        Ok(types
            .values()
            .map(|t| TypeSummary {
                name: t.name.clone(),
                constructible: t.constructible,
                internal: t.internal,
            })
            .collect())
    }

    fn resolve_type(&self, name: &str) -> Result<Option<TypeDescriptor>> {
        self.check_available()?;
        let types = self.types.read().expect("types lock poisoned");
        Ok(types.get(name).cloned())
    }

    fn property_details(&self, type_name: &str) -> Result<Vec<PropertyDetail>> {
        self.check_available()?;
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let types = self.types.read().expect("types lock poisoned");
        let descriptor = types.get(type_name);
        Ok(descriptor
            .map(|t| {
                t.properties
                    .iter()
                    .map(|p| PropertyDetail {
                        property: p.name.clone(),
                        label: p.label.clone(),
                        description: p.description.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn enum_values(&self, enum_name: &str) -> Result<Option<Vec<String>>> {
        self.check_available()?;
        let enums = self.enums.read().expect("enums lock poisoned");
        Ok(enums.get(enum_name).cloned())
    }
}

impl StorageProvider for InMemoryBackend {
    fn load(&self, type_name: &str, name: &str) -> Result<Option<ObjectInstance>> {
        self.check_available()?;
        let objects = self.objects.read().expect("objects lock poisoned");
        Ok(objects.get(&Self::object_key(type_name, name)).cloned())
    }

    fn store(&self, type_name: &str, name: &str, instance: &ObjectInstance) -> Result<bool> {
        self.check_available()?;
        let mut objects = self.objects.write().expect("objects lock poisoned");
        objects.insert(Self::object_key(type_name, name), instance.clone());
        Ok(true)
    }

    fn delete(&self, type_name: &str, name: &str) -> Result<bool> {
        self.check_available()?;
        let mut objects = self.objects.write().expect("objects lock poisoned");
        Ok(objects.remove(&Self::object_key(type_name, name)).is_some())
    }
}

impl PatternLibrary for InMemoryBackend {
    fn pattern(&self, name: &str, version: Option<&str>) -> Result<Option<PatternNode>> {
        self.check_available()?;
        let patterns = self.patterns.read().expect("patterns lock poisoned");
        let Some(versions) = patterns.get(name) else {
            return Ok(None);
        };
        if let Some(requested) = version {
            if let Some(found) = versions.iter().find(|v| v.version == requested) {
                return Ok(Some(found.root.clone()));
            }
            // Legacy negotiation: absent version falls back to the first
            // available one. Flagged for product confirmation.
            if let Some(first) = versions.first() {
                tracing::warn!(
                    pattern = name,
                    requested_version = requested,
                    substituted_version = %first.version,
                    "pattern_version_substituted"
                );
                return Ok(Some(first.root.clone()));
            }
            return Ok(None);
        }
        Ok(versions.first().map(|v| v.root.clone()))
    }

    fn validate(&self, name: &str, container: &ObjectInstance) -> Result<bool> {
        self.check_available()?;
        let patterns = self.patterns.read().expect("patterns lock poisoned");
        let versions = patterns
            .get(name)
            .ok_or_else(|| ArtifexError::PatternNotFound {
                pattern: name.to_string(),
            })?;
        let Some(first) = versions.first() else {
            return Err(ArtifexError::PatternNotFound {
                pattern: name.to_string(),
            });
        };
        Ok(Self::node_satisfied(&first.root, container))
    }
}
