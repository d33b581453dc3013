//! Catalog glue: type listing and schema queries

use artifex_core::errors::Result;

use crate::registry::{ActionHandler, ActionRequest};
use crate::state::AppState;

/// `ListTypes` - constructible, non-internal kinds
pub struct ListTypesHandler;

impl ActionHandler for ListTypesHandler {
    fn handle(&self, state: &AppState, _request: &ActionRequest) -> Result<serde_json::Value> {
        let types = state.catalog.list_types()?;
        Ok(serde_json::json!({ "types": types }))
    }
}

/// `GetType` - full descriptor for one kind
pub struct GetTypeHandler;

impl ActionHandler for GetTypeHandler {
    fn handle(&self, state: &AppState, request: &ActionRequest) -> Result<serde_json::Value> {
        let type_name = request.require_object_type()?;
        let descriptor = state.catalog.get_type(type_name)?;
        Ok(serde_json::to_value(descriptor.as_ref())?)
    }
}

/// `GetProperties` - batched display details for every property of a kind
pub struct GetPropertiesHandler;

impl ActionHandler for GetPropertiesHandler {
    fn handle(&self, state: &AppState, request: &ActionRequest) -> Result<serde_json::Value> {
        let type_name = request.require_object_type()?;
        // Resolve the descriptor first so an unknown kind is NotFound,
        // not an empty detail list
        state.catalog.get_type(type_name)?;
        let details = state.catalog.property_details(type_name)?;
        let mut properties: Vec<_> = details.values().cloned().collect();
        properties.sort_by(|a, b| a.property.cmp(&b.property));
        Ok(serde_json::json!({ "properties": properties }))
    }
}
