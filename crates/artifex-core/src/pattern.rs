//! Pattern Engine - materializes object trees from declarative templates
//!
//! Walks a PatternNode tree pre-order, instantiating an element per
//! non-container node and attaching it to the current container's child
//! collection. Unknown node types are skipped with their subtree while
//! the remainder of the tree is still built; a hard depth guard stops
//! runaway or malformed pattern definitions. The engine never asserts
//! success itself: the pattern library's structural validator is a
//! separate, explicit step owned by the pattern source.

use std::sync::Arc;

use crate::catalog::TypeCatalog;
use crate::errors::{ArtifexError, Result};
use crate::factory::ObjectFactory;
use crate::model::{ObjectInstance, PatternNode, CHILD_COLLECTION};

/// Default maximum pattern tree depth
pub const DEFAULT_PATTERN_DEPTH: usize = 10;

/// One node the build skipped, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedNode {
    pub type_name: String,
    pub reason: String,
}

/// Outcome of one pattern build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Elements created (reused `require_one` elements are not counted)
    pub created: usize,
    /// Nodes skipped together with their subtrees
    pub skipped: Vec<SkippedNode>,
}

impl BuildReport {
    /// True when the build completed but some nodes were skipped
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Builds concrete object trees from PatternNode trees
pub struct PatternBuilder {
    factory: Arc<ObjectFactory>,
    catalog: Arc<TypeCatalog>,
    max_depth: usize,
}

impl PatternBuilder {
    pub fn new(factory: Arc<ObjectFactory>, catalog: Arc<TypeCatalog>) -> Self {
        Self::with_max_depth(factory, catalog, DEFAULT_PATTERN_DEPTH)
    }

    pub fn with_max_depth(
        factory: Arc<ObjectFactory>,
        catalog: Arc<TypeCatalog>,
        max_depth: usize,
    ) -> Self {
        Self {
            factory,
            catalog,
            max_depth,
        }
    }

    /// Materialize `root` onto `container`
    ///
    /// # Errors
    /// * `PatternNodeUnresolvable` - the root names a type that cannot be
    ///   instantiated (non-root nodes are skipped instead)
    /// * `ProviderUnavailable` - the backend is unreachable
    pub fn build(&self, root: &PatternNode, container: &mut ObjectInstance) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        if root.is_container() {
            self.apply_restrictions(root, container);
            for child in &root.children {
                self.build_node(child, container, 2, &mut report)?;
            }
            return Ok(report);
        }

        // A non-container root must be creatable; there is nothing to
        // partially build otherwise.
        match self.catalog.get_type(&root.type_name) {
            Ok(descriptor) if descriptor.constructible => {}
            Err(e @ ArtifexError::ProviderUnavailable { .. }) => return Err(e),
            _ => {
                return Err(ArtifexError::PatternNodeUnresolvable {
                    type_name: root.type_name.clone(),
                });
            }
        }
        self.build_node(root, container, 1, &mut report)?;
        Ok(report)
    }

    fn build_node(
        &self,
        node: &PatternNode,
        container: &mut ObjectInstance,
        depth: usize,
        report: &mut BuildReport,
    ) -> Result<()> {
        if depth > self.max_depth {
            tracing::warn!(
                type_name = %node.type_name,
                depth = depth,
                "pattern_node_skipped_max_depth"
            );
            report.skipped.push(SkippedNode {
                type_name: node.type_name.clone(),
                reason: "max depth exceeded".to_string(),
            });
            return Ok(());
        }

        if node.is_container() {
            // No element for the implicit container; restrictions apply
            // to the current container itself.
            self.apply_restrictions(node, container);
            for child in &node.children {
                self.build_node(child, container, depth + 1, report)?;
            }
            return Ok(());
        }

        if node.require_one {
            let position = container
                .collection(CHILD_COLLECTION)
                .and_then(|elements| elements.iter().position(|e| e.type_name == node.type_name));
            if let Some(position) = position {
                // Reuse the existing element: detach, configure, reattach
                // at the same position.
                let mut element = container
                    .collections
                    .get_mut(CHILD_COLLECTION)
                    .expect("collection present by position lookup")
                    .remove(position);
                self.apply_restrictions(node, &mut element);
                for child in &node.children {
                    self.build_node(child, &mut element, depth + 1, report)?;
                }
                container
                    .collections
                    .get_mut(CHILD_COLLECTION)
                    .expect("collection present by position lookup")
                    .insert(position, element);
                return Ok(());
            }
        }

        let mut element = match self.factory.instantiate(&node.type_name) {
            Ok(element) => element,
            Err(e @ ArtifexError::ProviderUnavailable { .. }) => return Err(e),
            Err(e) => {
                tracing::warn!(
                    type_name = %node.type_name,
                    error = %e,
                    "pattern_node_skipped"
                );
                report.skipped.push(SkippedNode {
                    type_name: node.type_name.clone(),
                    reason: "unknown or uncreatable type".to_string(),
                });
                return Ok(());
            }
        };

        // Restrictions before recursion, so children see a fully
        // configured parent.
        self.apply_restrictions(node, &mut element);
        for child in &node.children {
            self.build_node(child, &mut element, depth + 1, report)?;
        }

        container.add_child(CHILD_COLLECTION, element);
        report.created += 1;
        Ok(())
    }

    /// Assert the node's property restrictions on the element
    ///
    /// Undeclared or read-only targets are logged and skipped; a bad
    /// restriction never fails the build.
    fn apply_restrictions(&self, node: &PatternNode, element: &mut ObjectInstance) {
        if node.restrictions.is_empty() {
            return;
        }
        let descriptor = self.catalog.get_type(&element.type_name).ok();
        for restriction in &node.restrictions {
            if let Some(descriptor) = &descriptor {
                match descriptor.property(&restriction.property) {
                    None => {
                        tracing::warn!(
                            type_name = %element.type_name,
                            property = %restriction.property,
                            "pattern_restriction_unknown_property"
                        );
                        continue;
                    }
                    Some(pd) if pd.read_only => {
                        tracing::warn!(
                            type_name = %element.type_name,
                            property = %restriction.property,
                            "pattern_restriction_read_only_property"
                        );
                        continue;
                    }
                    Some(_) => {}
                }
            }
            element.set_property(restriction.property.clone(), restriction.value.clone());
        }
    }
}
