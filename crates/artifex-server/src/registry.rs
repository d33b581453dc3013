//! Action registry
//!
//! Maps action names to handlers. Resolution is a case-insensitive exact
//! match: registry keys are lowercased at registration and lookups
//! lowercase the inbound action. Exactly one handler per name; a second
//! registration replaces the first.

use std::collections::HashMap;
use std::sync::Arc;

use artifex_core::errors::{ArtifexError, Result};
use artifex_core::factory::ParamMap;
use artifex_core_types::RequestContext;

use crate::state::AppState;

/// Decoded request as handlers see it
#[derive(Debug, Clone)]
pub struct ActionRequest {
    /// Canonical action name the handler was registered under
    pub action: String,
    pub object_type: Option<String>,
    pub parameters: ParamMap,
    pub context: RequestContext,
}

impl ActionRequest {
    /// The target kind, required by object-scoped actions
    pub fn require_object_type(&self) -> Result<&str> {
        self.object_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ArtifexError::RequiredParameterMissing {
                type_name: self.action.clone(),
                parameter: "objectType".to_string(),
            })
    }

    /// A required string parameter
    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.parameters
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| ArtifexError::RequiredParameterMissing {
                type_name: self.action.clone(),
                parameter: key.to_string(),
            })
    }

    /// An optional string parameter
    pub fn optional_str(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(|v| v.as_str())
    }

    /// An optional boolean parameter, false when absent
    pub fn flag(&self, key: &str) -> bool {
        self.parameters
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

/// One registered action
pub trait ActionHandler: Send + Sync {
    /// Execute the action; runs on the blocking pool
    fn handle(&self, state: &AppState, request: &ActionRequest) -> Result<serde_json::Value>;
}

/// Name → handler table with case-insensitive resolution
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, (String, Arc<dyn ActionHandler>)>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under its canonical name
    pub fn register(&mut self, name: &str, handler: Arc<dyn ActionHandler>) {
        self.handlers
            .insert(name.to_ascii_lowercase(), (name.to_string(), handler));
    }

    /// Resolve an inbound action to (canonical name, handler)
    pub fn resolve(&self, action: &str) -> Option<(&str, &Arc<dyn ActionHandler>)> {
        self.handlers
            .get(&action.to_ascii_lowercase())
            .map(|(name, handler)| (name.as_str(), handler))
    }

    /// Canonical names of every registered action, sorted
    pub fn action_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .handlers
            .values()
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}
