//! Result containers for the inspection surface
//!
//! Plain data, wire-serializable, no I/O. Properties (non-collection
//! members) and Collections are reported separately, matching the split
//! downstream consumers expect.

use serde::{Deserialize, Serialize};

use crate::model::ValueKind;

/// Marker appended to a capped identifier list
pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// Top-level result of one inspection call
///
/// Never an `Err`: an object that fails to load is reported with
/// `found: false` and the reason in `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectView>,
}

impl Inspection {
    pub fn not_found(error: impl Into<String>) -> Self {
        Self {
            found: false,
            error: Some(error.into()),
            object: None,
        }
    }

    pub fn found(object: ObjectView) -> Self {
        Self {
            found: true,
            error: None,
            object: Some(object),
        }
    }
}

/// Bounded view of one instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectView {
    pub type_name: String,
    pub name: String,
    /// Count of scalar members (present in every mode, including summary)
    pub properties_count: usize,
    /// Scalar member detail; empty in summary mode
    pub properties: Vec<PropertyView>,
    pub collections: Vec<CollectionView>,
    /// Explicit marker when the depth or cycle guard stopped descent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<String>,
}

impl ObjectView {
    /// A view for an instance the guards refused to descend into
    pub fn truncated(type_name: &str, name: &str, marker: impl Into<String>) -> Self {
        Self {
            type_name: type_name.to_string(),
            name: name.to_string(),
            properties_count: 0,
            properties: Vec::new(),
            collections: Vec::new(),
            truncated: Some(marker.into()),
        }
    }
}

/// View of one scalar member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: ValueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    pub read_only: bool,
    pub nullable: bool,
    /// Full candidate list for enum-like members; empty otherwise
    pub enum_candidates: Vec<String>,
    /// Inline failure reading or resolving this member; never aborts the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// View of one collection member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionView {
    pub name: String,
    pub element_type: String,
    /// Enumerated count, stopped at the configured cap
    pub count: usize,
    /// True when enumeration stopped at the cap (count is the cap, not an
    /// estimate)
    pub count_capped: bool,
    pub items: Vec<ItemView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One enumerated collection item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    /// Human-readable identifier chosen by the identifying-field preference
    /// order, falling back to the item's type name
    pub identifier: String,
    /// Recursive expansion; populated only in single-collection mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Box<ObjectView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemView {
    pub fn identifier_only(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            detail: None,
            error: None,
        }
    }
}
