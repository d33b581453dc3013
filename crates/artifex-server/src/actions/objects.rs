//! Object glue: create, load, save, delete, inspect

use artifex_core::errors::{ArtifexError, Result};
use artifex_core::inspector::InspectMode;
use artifex_core::model::ObjectInstance;

use crate::registry::{ActionHandler, ActionRequest};
use crate::state::AppState;

/// `CreateObject` - validated create with artifacts and diagnostics
pub struct CreateObjectHandler;

impl ActionHandler for CreateObjectHandler {
    fn handle(&self, state: &AppState, request: &ActionRequest) -> Result<serde_json::Value> {
        let type_name = request.require_object_type()?;
        let outcome = state.factory.create(type_name, &request.parameters)?;
        Ok(serde_json::json!({
            "name": outcome.instance.name,
            "artifacts": outcome.artifacts,
            "diagnostics": outcome.diagnostics,
        }))
    }
}

/// `GetObject` - load a persisted instance verbatim
pub struct GetObjectHandler;

impl ActionHandler for GetObjectHandler {
    fn handle(&self, state: &AppState, request: &ActionRequest) -> Result<serde_json::Value> {
        let type_name = request.require_object_type()?;
        let name = request.require_str("name")?;
        let instance = state.factory.get_existing(type_name, name)?;
        Ok(serde_json::to_value(&instance)?)
    }
}

/// `SaveObject` - persist a caller-supplied instance
pub struct SaveObjectHandler;

impl ActionHandler for SaveObjectHandler {
    fn handle(&self, state: &AppState, request: &ActionRequest) -> Result<serde_json::Value> {
        let type_name = request.require_object_type()?;
        let name = request.require_str("name")?;
        let raw = request
            .parameters
            .get("object")
            .ok_or_else(|| ArtifexError::RequiredParameterMissing {
                type_name: request.action.clone(),
                parameter: "object".to_string(),
            })?;
        let instance: ObjectInstance = serde_json::from_value(raw.clone())?;
        let saved = state.factory.save(type_name, name, &instance)?;
        Ok(serde_json::json!({ "saved": saved }))
    }
}

/// `DeleteObject` - non-cascading delete
///
/// The `cascade` flag is declared on the protocol surface but not
/// implemented; passing it true is an explicit `ERR_NOT_IMPLEMENTED`,
/// never a silent deep delete.
pub struct DeleteObjectHandler;

impl ActionHandler for DeleteObjectHandler {
    fn handle(&self, state: &AppState, request: &ActionRequest) -> Result<serde_json::Value> {
        let type_name = request.require_object_type()?;
        let name = request.require_str("name")?;
        if request.flag("cascade") {
            return Err(ArtifexError::NotImplemented {
                feature: "cascade delete".to_string(),
            });
        }
        let deleted = state.factory.delete(type_name, name)?;
        Ok(serde_json::json!({ "deleted": deleted }))
    }
}

/// `InspectObject` - bounded view with a mode parameter
///
/// Modes: `full` (default), `summary`, `properties`, `collection` (with
/// the `collection` parameter naming the target).
pub struct InspectObjectHandler;

impl ActionHandler for InspectObjectHandler {
    fn handle(&self, state: &AppState, request: &ActionRequest) -> Result<serde_json::Value> {
        let type_name = request.require_object_type()?;
        let name = request.require_str("name")?;
        let mode = parse_mode(request)?;
        let inspection = state.inspector.inspect(type_name, name, &mode);
        Ok(serde_json::to_value(&inspection)?)
    }
}

fn parse_mode(request: &ActionRequest) -> Result<InspectMode> {
    match request.optional_str("mode").unwrap_or("full") {
        "full" => Ok(InspectMode::Full),
        "summary" => Ok(InspectMode::Summary),
        "properties" => Ok(InspectMode::PropertiesOnly),
        "collection" => Ok(InspectMode::Collection(
            request.require_str("collection")?.to_string(),
        )),
        _ => Err(ArtifexError::ParameterFormatMismatch {
            parameter: "mode".to_string(),
            format: "full|summary|properties|collection".to_string(),
        }),
    }
}
