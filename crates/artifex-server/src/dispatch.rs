//! Single dispatch entry point for inbound envelopes
//!
//! Resolves the action, times the handler, and converts every failure
//! into an error response. Nothing a handler does can escape this
//! boundary as anything other than a ResponseEnvelope.

use std::time::Instant;

use artifex_core::errors::ArtifexError;
use artifex_core::{log_op_end, log_op_error, log_op_start};
use artifex_core_types::RequestContext;

use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::registry::{ActionRegistry, ActionRequest};
use crate::state::AppState;

/// Execute one request synchronously; runs on the blocking pool
pub fn dispatch(
    registry: &ActionRegistry,
    state: &AppState,
    envelope: RequestEnvelope,
    context: RequestContext,
) -> ResponseEnvelope {
    let started = Instant::now();
    let id = envelope.id.clone();

    let Some((canonical, handler)) = registry.resolve(&envelope.action) else {
        let err = ArtifexError::UnknownAction {
            action: envelope.action.clone(),
        };
        let elapsed = started.elapsed().as_millis() as u64;
        log_op_error!(
            "dispatch",
            err.clone(),
            duration_ms = elapsed,
            action = %envelope.action,
            correlation_id = %context.correlation_id
        );
        return ResponseEnvelope::failure(id, err.to_string(), elapsed);
    };

    let request = ActionRequest {
        action: canonical.to_string(),
        object_type: envelope.object_type,
        parameters: envelope.parameters.unwrap_or_default(),
        context: context.clone(),
    };

    log_op_start!(
        "dispatch",
        action = %request.action,
        correlation_id = %context.correlation_id
    );

    match handler.handle(state, &request) {
        Ok(data) => {
            let elapsed = started.elapsed().as_millis() as u64;
            log_op_end!(
                "dispatch",
                duration_ms = elapsed,
                action = %request.action,
                correlation_id = %context.correlation_id
            );
            ResponseEnvelope::success(id, data, elapsed)
        }
        Err(err) => {
            let elapsed = started.elapsed().as_millis() as u64;
            log_op_error!(
                "dispatch",
                err.clone(),
                duration_ms = elapsed,
                action = %request.action,
                correlation_id = %context.correlation_id
            );
            ResponseEnvelope::failure(id, err.to_string(), elapsed)
        }
    }
}
