//! Object Inspector - bounded, cycle-safe views of object instances
//!
//! Produces a UI/agent-consumable view of one instance, split into
//! Properties (non-collection members) and Collections. Enumeration is
//! capped, recursion is guarded by an explicit per-call context, and a
//! member that fails to resolve is reported inline instead of aborting
//! the whole inspection.

pub mod context;
pub mod views;

use std::sync::Arc;

use crate::catalog::TypeCatalog;
use crate::factory::ObjectFactory;
use crate::model::{CollectionDescriptor, ObjectInstance, PropertyDescriptor, TypeDescriptor};

pub use context::{Enter, InspectContext, InspectLimits};
pub use views::{
    CollectionView, Inspection, ItemView, ObjectView, PropertyView, TRUNCATION_MARKER,
};

/// Identifying fields tried in order when naming a collection item
pub const IDENTIFIER_PREFERENCE: [&str; 6] =
    ["Name", "Label", "Title", "Key", "Id", "Description"];

/// Access mode of one inspection call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectMode {
    /// Properties with full detail plus every collection with capped
    /// count and capped identifier list (the default wire mode)
    Full,
    /// Counts only; no identifier extraction, fastest
    Summary,
    /// Property detail only; collections are not enumerated
    PropertiesOnly,
    /// Uncapped enumeration of one named collection, items expanded
    /// recursively (bounded only by the depth/cycle guard)
    Collection(String),
}

/// Reads instances into bounded views
pub struct Inspector {
    catalog: Arc<TypeCatalog>,
    factory: Arc<ObjectFactory>,
    limits: InspectLimits,
}

impl Inspector {
    pub fn new(catalog: Arc<TypeCatalog>, factory: Arc<ObjectFactory>) -> Self {
        Self::with_limits(catalog, factory, InspectLimits::default())
    }

    pub fn with_limits(
        catalog: Arc<TypeCatalog>,
        factory: Arc<ObjectFactory>,
        limits: InspectLimits,
    ) -> Self {
        Self {
            catalog,
            factory,
            limits,
        }
    }

    pub fn limits(&self) -> InspectLimits {
        self.limits
    }

    /// Inspect a persisted object
    ///
    /// Never returns an error: a load failure is reported with
    /// `found: false` and the reason string.
    pub fn inspect(&self, type_name: &str, name: &str, mode: &InspectMode) -> Inspection {
        if let Err(e) = self.catalog.get_type(type_name) {
            return Inspection::not_found(e.to_string());
        }
        let instance = match self.factory.get_existing(type_name, name) {
            Ok(instance) => instance,
            Err(e) => return Inspection::not_found(e.to_string()),
        };
        Inspection::found(self.inspect_instance(&instance, mode))
    }

    /// Inspect an already-loaded instance with a fresh traversal context
    pub fn inspect_instance(&self, instance: &ObjectInstance, mode: &InspectMode) -> ObjectView {
        let mut ctx = InspectContext::new(self.limits.max_depth);
        self.view_of(instance, mode, &mut ctx)
    }

    fn view_of(
        &self,
        instance: &ObjectInstance,
        mode: &InspectMode,
        ctx: &mut InspectContext,
    ) -> ObjectView {
        match ctx.enter(&instance.handle) {
            Enter::TooDeep => {
                return ObjectView::truncated(
                    &instance.type_name,
                    &instance.name,
                    format!("max depth {} exceeded", ctx.max_depth()),
                );
            }
            Enter::Revisit => {
                return ObjectView::truncated(&instance.type_name, &instance.name, "cycle detected");
            }
            Enter::Entered => {}
        }
        let view = self.build_view(instance, mode, ctx);
        ctx.leave(&instance.handle);
        view
    }

    fn build_view(
        &self,
        instance: &ObjectInstance,
        mode: &InspectMode,
        ctx: &mut InspectContext,
    ) -> ObjectView {
        let descriptor = match self.catalog.get_type(&instance.type_name) {
            Ok(d) => d,
            // The invariant says this cannot happen for factory-produced
            // instances; surface it as a marker rather than failing.
            Err(e) => {
                return ObjectView::truncated(&instance.type_name, &instance.name, e.to_string());
            }
        };

        let properties = match mode {
            InspectMode::Summary => Vec::new(),
            _ => self.property_views(instance, &descriptor),
        };

        let collections = match mode {
            InspectMode::PropertiesOnly => Vec::new(),
            InspectMode::Summary => descriptor
                .collections
                .iter()
                .map(|cd| self.collection_counts(instance, cd))
                .collect(),
            InspectMode::Full => descriptor
                .collections
                .iter()
                .map(|cd| self.collection_capped(instance, cd))
                .collect(),
            InspectMode::Collection(name) => vec![self.collection_expanded(
                instance,
                &descriptor,
                name,
                ctx,
            )],
        };

        ObjectView {
            type_name: instance.type_name.clone(),
            name: instance.name.clone(),
            properties_count: descriptor.properties.len(),
            properties,
            collections,
            truncated: None,
        }
    }

    fn property_views(
        &self,
        instance: &ObjectInstance,
        descriptor: &TypeDescriptor,
    ) -> Vec<PropertyView> {
        // One batched, cached lookup covers label/description for every
        // property of the type.
        let details = self.catalog.property_details(&descriptor.name).ok();

        descriptor
            .properties
            .iter()
            .map(|pd| {
                let detail = details.as_ref().and_then(|d| d.get(&pd.name));
                let (enum_candidates, error) = if pd.is_enum() {
                    self.resolve_enum_candidates(&descriptor.name, pd)
                } else {
                    (Vec::new(), None)
                };
                PropertyView {
                    name: pd.name.clone(),
                    label: detail
                        .and_then(|d| d.label.clone())
                        .or_else(|| pd.label.clone()),
                    description: detail
                        .and_then(|d| d.description.clone())
                        .or_else(|| pd.description.clone()),
                    kind: pd.kind,
                    value: instance.get_property(&pd.name).cloned(),
                    read_only: pd.read_only,
                    nullable: pd.nullable,
                    enum_candidates,
                    error,
                }
            })
            .collect()
    }

    /// Resolve the candidate list of an enum-like property
    ///
    /// Order: directly-typed candidates on the descriptor (covers the
    /// nullable-enum case as well), then the backend's own enum set via
    /// name heuristics: the declared enum type, the property name, the
    /// property name with a trailing `Type` stripped, and the
    /// `{type}{property}` concatenation.
    fn resolve_enum_candidates(
        &self,
        type_name: &str,
        pd: &PropertyDescriptor,
    ) -> (Vec<String>, Option<String>) {
        if !pd.enum_candidates.is_empty() {
            return (pd.enum_candidates.clone(), None);
        }

        let mut candidates: Vec<String> = Vec::new();
        if let Some(enum_type) = &pd.enum_type {
            candidates.push(enum_type.clone());
        }
        candidates.push(pd.name.clone());
        if let Some(stripped) = pd.name.strip_suffix("Type") {
            if !stripped.is_empty() {
                candidates.push(stripped.to_string());
            }
        }
        candidates.push(format!("{}{}", type_name, pd.name));

        for candidate in candidates {
            match self.catalog.enum_candidates(&candidate) {
                Ok(Some(values)) => return (values, None),
                Ok(None) => continue,
                Err(e) => return (Vec::new(), Some(e.to_string())),
            }
        }
        (Vec::new(), None)
    }

    /// Count-only view; no identifier extraction
    fn collection_counts(
        &self,
        instance: &ObjectInstance,
        cd: &CollectionDescriptor,
    ) -> CollectionView {
        let (count, count_capped) = self.enumerate_count(instance, &cd.name);
        CollectionView {
            name: cd.name.clone(),
            element_type: cd.element_type.clone(),
            count,
            count_capped,
            items: Vec::new(),
            error: None,
        }
    }

    /// Capped count plus capped identifier list
    fn collection_capped(
        &self,
        instance: &ObjectInstance,
        cd: &CollectionDescriptor,
    ) -> CollectionView {
        let (count, count_capped) = self.enumerate_count(instance, &cd.name);
        let elements = instance.collection(&cd.name).unwrap_or(&[]);

        let mut items: Vec<ItemView> = elements
            .iter()
            .take(self.limits.identifier_cap)
            .map(|item| ItemView::identifier_only(identifier_for(item)))
            .collect();
        if count_capped || elements.len() > items.len() {
            items.push(ItemView::identifier_only(TRUNCATION_MARKER));
        }

        CollectionView {
            name: cd.name.clone(),
            element_type: cd.element_type.clone(),
            count,
            count_capped,
            items,
            error: None,
        }
    }

    /// Uncapped enumeration of one named collection with recursive
    /// expansion of each item (depth/cycle guard still applies)
    fn collection_expanded(
        &self,
        instance: &ObjectInstance,
        descriptor: &TypeDescriptor,
        name: &str,
        ctx: &mut InspectContext,
    ) -> CollectionView {
        let Some(cd) = descriptor
            .collections
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
        else {
            return CollectionView {
                name: name.to_string(),
                element_type: String::new(),
                count: 0,
                count_capped: false,
                items: Vec::new(),
                error: Some(format!(
                    "Collection not found: {} on {}",
                    name, descriptor.name
                )),
            };
        };

        let elements = instance.collection(&cd.name).unwrap_or(&[]);
        let items = elements
            .iter()
            .map(|item| ItemView {
                identifier: identifier_for(item),
                detail: Some(Box::new(self.expanded_view(item, ctx))),
                error: None,
            })
            .collect();

        CollectionView {
            name: cd.name.clone(),
            element_type: cd.element_type.clone(),
            count: elements.len(),
            count_capped: false,
            items,
            error: None,
        }
    }

    /// Full recursive view used inside single-collection expansion
    fn expanded_view(&self, instance: &ObjectInstance, ctx: &mut InspectContext) -> ObjectView {
        match ctx.enter(&instance.handle) {
            Enter::TooDeep => {
                return ObjectView::truncated(
                    &instance.type_name,
                    &instance.name,
                    format!("max depth {} exceeded", ctx.max_depth()),
                );
            }
            Enter::Revisit => {
                return ObjectView::truncated(&instance.type_name, &instance.name, "cycle detected");
            }
            Enter::Entered => {}
        }

        let view = match self.catalog.get_type(&instance.type_name) {
            Ok(descriptor) => {
                let properties = self.property_views(instance, &descriptor);
                let collections = descriptor
                    .collections
                    .iter()
                    .map(|cd| {
                        let elements = instance.collection(&cd.name).unwrap_or(&[]);
                        let items = elements
                            .iter()
                            .map(|item| ItemView {
                                identifier: identifier_for(item),
                                detail: Some(Box::new(self.expanded_view(item, ctx))),
                                error: None,
                            })
                            .collect();
                        CollectionView {
                            name: cd.name.clone(),
                            element_type: cd.element_type.clone(),
                            count: elements.len(),
                            count_capped: false,
                            items,
                            error: None,
                        }
                    })
                    .collect();
                ObjectView {
                    type_name: instance.type_name.clone(),
                    name: instance.name.clone(),
                    properties_count: descriptor.properties.len(),
                    properties,
                    collections,
                    truncated: None,
                }
            }
            Err(e) => ObjectView::truncated(&instance.type_name, &instance.name, e.to_string()),
        };

        ctx.leave(&instance.handle);
        view
    }

    /// Enumerate up to the hard cap; the reported count is exact below
    /// the cap and equal to the cap (not an estimate) above it.
    fn enumerate_count(&self, instance: &ObjectInstance, collection: &str) -> (usize, bool) {
        let elements = instance.collection(collection).unwrap_or(&[]);
        let cap = self.limits.collection_count_cap;
        let count = elements.iter().take(cap).count();
        (count, elements.len() > cap)
    }
}

/// Choose a human-readable identifier for a collection item
fn identifier_for(item: &ObjectInstance) -> String {
    for field in IDENTIFIER_PREFERENCE {
        match item.get_property(field) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(serde_json::Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    item.type_name.clone()
}
