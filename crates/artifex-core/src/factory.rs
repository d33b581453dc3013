//! Object Factory - validated create/read/save/delete for any cataloged kind
//!
//! Creation validates the caller's parameter map against the kind's
//! declared parameter list and fails fast with no side effects; only a
//! fully validated instance reaches the storage provider. The factory
//! performs no instance caching: `get_existing` always re-resolves
//! through the provider.

use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::TypeCatalog;
use crate::errors::{ArtifexError, Result};
use crate::model::{ObjectInstance, TypeDescriptor};
use crate::provider::StorageProvider;

/// Parameter map as received from the wire
pub type ParamMap = serde_json::Map<String, serde_json::Value>;

/// Result of a successful create
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    /// The persisted instance
    pub instance: ObjectInstance,
    /// Identifiers of everything the create produced (`type/name` entries)
    pub artifacts: Vec<String>,
    /// Non-fatal notes, e.g. undeclared parameters that were ignored
    pub diagnostics: Vec<String>,
}

/// Creates, loads, saves, and deletes instances of cataloged kinds
pub struct ObjectFactory {
    catalog: Arc<TypeCatalog>,
    storage: Arc<dyn StorageProvider>,
}

impl ObjectFactory {
    pub fn new(catalog: Arc<TypeCatalog>, storage: Arc<dyn StorageProvider>) -> Self {
        Self { catalog, storage }
    }

    /// Create and persist a new instance
    ///
    /// Validation order: required parameters, then declared format
    /// constraints; defaults are applied for omitted optional parameters.
    /// Any validation failure returns before a single side effect.
    ///
    /// # Errors
    /// * `TypeNotFound` - the kind is unknown to the catalog
    /// * `RequiredParameterMissing` - a required parameter was omitted
    /// * `ParameterFormatMismatch` - a value fails its declared format
    /// * `ProviderUnavailable` - the backend is unreachable
    pub fn create(&self, type_name: &str, params: &ParamMap) -> Result<CreateOutcome> {
        let descriptor = self.catalog.get_type(type_name)?;

        let mut diagnostics = Vec::new();
        let effective = self.validate_params(&descriptor, params, &mut diagnostics)?;

        let name = match effective.get("name").and_then(|v| v.as_str()) {
            Some(n) => n.to_string(),
            None => {
                let generated = generated_name(type_name);
                diagnostics.push(format!(
                    "no name parameter supplied; generated '{}'",
                    generated
                ));
                generated
            }
        };

        let instance = build_instance(&descriptor, &name, &effective);
        self.storage.store(type_name, &name, &instance)?;
        tracing::debug!(
            type_name = type_name,
            object_name = %name,
            "object_created"
        );

        Ok(CreateOutcome {
            artifacts: vec![format!("{}/{}", type_name, name)],
            diagnostics,
            instance,
        })
    }

    /// Construct a transient element without persisting it
    ///
    /// Used by the pattern engine for elements that live inside a
    /// container; the element's name is generated and unique.
    pub fn instantiate(&self, type_name: &str) -> Result<ObjectInstance> {
        let descriptor = self.catalog.get_type(type_name)?;
        if !descriptor.constructible {
            return Err(ArtifexError::TypeNotFound {
                type_name: type_name.to_string(),
            });
        }
        let defaults = ParamMap::new();
        Ok(build_instance(
            &descriptor,
            &generated_name(type_name),
            &apply_defaults(&descriptor, defaults),
        ))
    }

    /// Load a persisted instance; always re-resolves through the provider
    ///
    /// # Errors
    /// * `TypeNotFound` - the kind is unknown to the catalog
    /// * `ObjectNotFound` - no persisted instance with that name
    pub fn get_existing(&self, type_name: &str, name: &str) -> Result<ObjectInstance> {
        // Invariant: never hand out an instance whose type the catalog
        // cannot resolve.
        self.catalog.get_type(type_name)?;

        self.storage
            .load(type_name, name)?
            .ok_or_else(|| ArtifexError::ObjectNotFound {
                type_name: type_name.to_string(),
                name: name.to_string(),
            })
    }

    /// Persist an instance under the given name
    pub fn save(&self, type_name: &str, name: &str, instance: &ObjectInstance) -> Result<bool> {
        self.catalog.get_type(type_name)?;
        self.storage.store(type_name, name, instance)
    }

    /// Delete a persisted instance; false when it was absent
    ///
    /// Non-cascading: dependent objects are left untouched. Cascading
    /// deletion is a declared future capability, not a present guarantee.
    pub fn delete(&self, type_name: &str, name: &str) -> Result<bool> {
        self.catalog.get_type(type_name)?;
        self.storage.delete(type_name, name)
    }

    /// Validate against the declared parameter list; returns the
    /// effective map with defaults applied.
    fn validate_params(
        &self,
        descriptor: &TypeDescriptor,
        params: &ParamMap,
        diagnostics: &mut Vec<String>,
    ) -> Result<ParamMap> {
        for spec in &descriptor.parameters {
            if spec.required && !params.contains_key(&spec.name) {
                return Err(ArtifexError::RequiredParameterMissing {
                    type_name: descriptor.name.clone(),
                    parameter: spec.name.clone(),
                });
            }
        }

        let effective = apply_defaults(descriptor, params.clone());

        for spec in &descriptor.parameters {
            let Some(format) = &spec.format else { continue };
            let Some(value) = effective.get(&spec.name).and_then(|v| v.as_str()) else {
                continue;
            };
            let anchored = format!("^(?:{})$", format);
            let re = regex::Regex::new(&anchored).map_err(|e| ArtifexError::Internal {
                message: format!(
                    "invalid format constraint on parameter {}: {}",
                    spec.name, e
                ),
            })?;
            if !re.is_match(value) {
                return Err(ArtifexError::ParameterFormatMismatch {
                    parameter: spec.name.clone(),
                    format: format.clone(),
                });
            }
        }

        for key in params.keys() {
            if descriptor.parameter(key).is_none() {
                diagnostics.push(format!(
                    "parameter '{}' is not declared by {}; ignored",
                    key, descriptor.name
                ));
            }
        }

        Ok(effective)
    }
}

/// Apply declared defaults for omitted optional parameters
fn apply_defaults(descriptor: &TypeDescriptor, mut params: ParamMap) -> ParamMap {
    for spec in &descriptor.parameters {
        if let Some(default) = &spec.default {
            params
                .entry(spec.name.clone())
                .or_insert_with(|| default.clone());
        }
    }
    params
}

/// Initialize an instance from its descriptor and effective parameters
///
/// Declared properties take same-named parameter values (parameter names
/// are matched case-insensitively, so the conventional lowercase `name`
/// parameter fills the `Name` property); every declared collection starts
/// present and empty.
fn build_instance(descriptor: &TypeDescriptor, name: &str, effective: &ParamMap) -> ObjectInstance {
    let mut instance = ObjectInstance::new(descriptor.name.clone(), name);
    for property in &descriptor.properties {
        let value = effective
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(&property.name))
            .map(|(_, value)| value.clone());
        if let Some(value) = value {
            instance.set_property(property.name.clone(), value);
        }
    }
    for collection in &descriptor.collections {
        instance.ensure_collection(collection.name.clone());
    }
    instance
}

fn generated_name(type_name: &str) -> String {
    format!(
        "{}-{}",
        type_name.to_ascii_lowercase(),
        Uuid::now_v7().simple()
    )
}
