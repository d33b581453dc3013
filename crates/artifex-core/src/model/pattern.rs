use serde::{Deserialize, Serialize};

/// Pseudo-type name denoting the implicit container node
///
/// A pattern node of this type creates no element; its restrictions apply
/// to the current container. Matched case-insensitively.
pub const CONTAINER_TYPE: &str = "Container";

/// Collection that pattern-built elements are attached to on their parent
pub const CHILD_COLLECTION: &str = "Elements";

/// A required property=value assertion applied during materialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRestriction {
    /// Target property on the element produced for the node
    pub property: String,

    /// Literal value to assert
    pub value: serde_json::Value,
}

/// One node of a declarative pattern tree
///
/// Purely descriptive: loaded from the external pattern library and
/// read-only to the engine. Children are materialized in declaration
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternNode {
    /// Kind to instantiate, or [`CONTAINER_TYPE`] for the implicit container
    pub type_name: String,

    /// When set, an existing same-type element in the container is reused
    /// instead of creating a second one
    #[serde(default)]
    pub require_one: bool,

    /// Property assertions applied to the produced (or reused) element
    #[serde(default)]
    pub restrictions: Vec<PropertyRestriction>,

    /// Child nodes, built with this node's element as their container
    #[serde(default)]
    pub children: Vec<PatternNode>,
}

impl PatternNode {
    /// A node with no restrictions and no children
    pub fn leaf(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            require_one: false,
            restrictions: Vec::new(),
            children: Vec::new(),
        }
    }

    /// True when this node denotes the implicit container pseudo-type
    pub fn is_container(&self) -> bool {
        self.type_name.eq_ignore_ascii_case(CONTAINER_TYPE)
    }

    /// Number of element-producing (non-container) nodes in this subtree
    pub fn non_container_count(&self) -> usize {
        let own = if self.is_container() { 0 } else { 1 };
        own + self
            .children
            .iter()
            .map(PatternNode::non_container_count)
            .sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(PatternNode::depth)
            .max()
            .unwrap_or(0)
    }
}
