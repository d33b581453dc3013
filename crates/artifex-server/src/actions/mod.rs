//! Action handlers - thin per-action glue over the core engine

pub mod catalog;
pub mod objects;
pub mod patterns;
pub mod system;

use std::sync::Arc;

use crate::registry::ActionRegistry;

/// Register every built-in action under its canonical name
pub fn register_all(registry: &mut ActionRegistry) {
    registry.register("Ping", Arc::new(system::PingHandler));
    registry.register("ListTypes", Arc::new(catalog::ListTypesHandler));
    registry.register("GetType", Arc::new(catalog::GetTypeHandler));
    registry.register("GetProperties", Arc::new(catalog::GetPropertiesHandler));
    registry.register("CreateObject", Arc::new(objects::CreateObjectHandler));
    registry.register("GetObject", Arc::new(objects::GetObjectHandler));
    registry.register("SaveObject", Arc::new(objects::SaveObjectHandler));
    registry.register("DeleteObject", Arc::new(objects::DeleteObjectHandler));
    registry.register("InspectObject", Arc::new(objects::InspectObjectHandler));
    registry.register("BuildPattern", Arc::new(patterns::BuildPatternHandler));
}
