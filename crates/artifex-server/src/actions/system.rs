//! Liveness glue

use artifex_core::errors::Result;

use crate::registry::{ActionHandler, ActionRequest};
use crate::state::AppState;

/// Trivial liveness probe
pub struct PingHandler;

impl ActionHandler for PingHandler {
    fn handle(&self, _state: &AppState, _request: &ActionRequest) -> Result<serde_json::Value> {
        Ok(serde_json::json!({ "pong": true }))
    }
}
