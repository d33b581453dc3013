use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// ObjectInstance - a handle to one created or loaded domain object
///
/// Instances are generic: a property map plus named child collections,
/// with the authoritative schema living in the instance's TypeDescriptor
/// (resolvable through the catalog for as long as the instance exists).
/// Created by the Object Factory, read by the Inspector and Pattern
/// Engine, never directly mutated outside Factory/Pattern calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInstance {
    /// Process-unique handle (UUID v7); identity for cycle detection
    pub handle: String,

    /// Cataloged kind this instance belongs to
    pub type_name: String,

    /// Caller-visible object name
    pub name: String,

    /// Scalar members, keyed by declared property name
    pub properties: BTreeMap<String, serde_json::Value>,

    /// Child collections, keyed by declared collection name
    pub collections: BTreeMap<String, Vec<ObjectInstance>>,

    /// Timestamp when this instance was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when this instance was last written
    pub updated_at: DateTime<Utc>,
}

impl ObjectInstance {
    /// Create a new empty instance of the given kind
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            handle: Uuid::now_v7().to_string(),
            type_name: type_name.into(),
            name: name.into(),
            properties: BTreeMap::new(),
            collections: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Read a scalar member
    pub fn get_property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }

    /// Write a scalar member
    pub fn set_property(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.properties.insert(name.into(), value);
        self.updated_at = Utc::now();
    }

    /// Read a child collection
    pub fn collection(&self, name: &str) -> Option<&[ObjectInstance]> {
        self.collections.get(name).map(|v| v.as_slice())
    }

    /// Append a child to the named collection, creating it if absent
    pub fn add_child(&mut self, collection: impl Into<String>, child: ObjectInstance) {
        self.collections.entry(collection.into()).or_default().push(child);
        self.updated_at = Utc::now();
    }

    /// Ensure the named collection exists (possibly empty)
    pub fn ensure_collection(&mut self, name: impl Into<String>) {
        self.collections.entry(name.into()).or_default();
    }

    /// Names of the child collections present on this instance
    pub fn collection_names(&self) -> impl Iterator<Item = &String> {
        self.collections.keys()
    }

    /// Total number of direct children across all collections
    pub fn child_count(&self) -> usize {
        self.collections.values().map(|v| v.len()).sum()
    }
}
