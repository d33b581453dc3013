use serde::{Deserialize, Serialize};

/// Value kind of a scalar property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Text,
    Integer,
    Decimal,
    Boolean,
    Enum,
}

/// Schema for one scalar member of a cataloged type
///
/// Owned by a TypeDescriptor. Enum-like properties may carry their candidate
/// values directly (`enum_candidates`) or reference a catalog-registered enum
/// by name (`enum_type`); the inspector resolves whichever is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Member name as the external schema declares it
    pub name: String,

    /// Scalar value kind
    pub kind: ValueKind,

    /// Display label, if the schema declares one
    pub label: Option<String>,

    /// Display description, if the schema declares one
    pub description: Option<String>,

    /// True when the member cannot be written through the factory
    pub read_only: bool,

    /// True when the member accepts a null value
    pub nullable: bool,

    /// Name of a catalog-registered enum, for enum-like members
    pub enum_type: Option<String>,

    /// Directly-typed candidate values (may be empty even for enums)
    pub enum_candidates: Vec<String>,
}

impl PropertyDescriptor {
    /// Minimal descriptor for a writable, non-null text member
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ValueKind::Text,
            label: None,
            description: None,
            read_only: false,
            nullable: false,
            enum_type: None,
            enum_candidates: Vec::new(),
        }
    }

    /// True for members whose kind is enum-like
    pub fn is_enum(&self) -> bool {
        self.kind == ValueKind::Enum
    }
}

/// Schema for one collection member of a cataloged type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDescriptor {
    /// Member name as the external schema declares it
    pub name: String,

    /// Type name of the collection's elements
    pub element_type: String,
}

/// Declared creation parameter for a cataloged type
///
/// The factory validates the caller's parameter map against these before
/// any side effect: required parameters must be present, omitted optional
/// parameters take `default`, and string values must fully match `format`
/// when one is declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub required: bool,
    pub default: Option<serde_json::Value>,
    /// Regex the value must fully match (string parameters only)
    pub format: Option<String>,
}

impl ParameterSpec {
    /// A required parameter with no default or format constraint
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            default: None,
            format: None,
        }
    }

    /// An optional parameter carrying a default value
    pub fn optional(name: impl Into<String>, default: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            required: false,
            default: Some(default),
            format: None,
        }
    }
}

/// Schema for one cataloged object kind
///
/// Immutable once the catalog caches it: created on first lookup, never
/// mutated, evicted only on process restart. Always handled as
/// `Arc<TypeDescriptor>` past the catalog boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Kind name, unique within the namespace
    pub name: String,

    /// Namespace the external schema assigns the kind to
    pub namespace: String,

    /// Base kind this kind derives from, if any
    pub base_type: Option<String>,

    /// True when instances can be constructed without arguments
    pub constructible: bool,

    /// True for helper/base kinds that the catalog hides from listings
    pub internal: bool,

    /// Scalar members
    pub properties: Vec<PropertyDescriptor>,

    /// Collection members
    pub collections: Vec<CollectionDescriptor>,

    /// Declared creation parameters
    pub parameters: Vec<ParameterSpec>,
}

impl TypeDescriptor {
    /// Find a scalar member by name
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Find a collection member by name
    pub fn collection(&self, name: &str) -> Option<&CollectionDescriptor> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Find a declared creation parameter by name
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Qualified `namespace.name` form used in logs
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> TypeDescriptor {
        TypeDescriptor {
            name: "Widget".to_string(),
            namespace: "Demo".to_string(),
            base_type: None,
            constructible: true,
            internal: false,
            properties: vec![PropertyDescriptor::text("Name")],
            collections: vec![CollectionDescriptor {
                name: "Items".to_string(),
                element_type: "Item".to_string(),
            }],
            parameters: vec![ParameterSpec::required("name")],
        }
    }

    #[test]
    fn test_member_lookup() {
        let t = widget();
        assert!(t.property("Name").is_some());
        assert!(t.property("Missing").is_none());
        assert!(t.collection("Items").is_some());
        assert!(t.parameter("name").is_some());
    }

    #[test]
    fn test_qualified_name() {
        let mut t = widget();
        assert_eq!(t.qualified_name(), "Demo.Widget");
        t.namespace = String::new();
        assert_eq!(t.qualified_name(), "Widget");
    }

    #[test]
    fn test_parameter_spec_helpers() {
        let p = ParameterSpec::required("name");
        assert!(p.required);
        assert!(p.default.is_none());

        let q = ParameterSpec::optional("caption", serde_json::json!("Untitled"));
        assert!(!q.required);
        assert_eq!(q.default, Some(serde_json::json!("Untitled")));
    }
}
