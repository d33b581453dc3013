//! Pattern glue: materialize a template onto a target object
//!
//! Build order: fetch the pattern, obtain the target container (existing
//! object, or a fresh transient instance), materialize, then invoke the
//! library's structural validator and honor its boolean verdict before
//! persisting.

use artifex_core::errors::{ArtifexError, Result};

use crate::registry::{ActionHandler, ActionRequest};
use crate::state::AppState;

/// `BuildPattern` - parameters: `pattern` (required), `version`,
/// `targetType` (required), `targetName`
pub struct BuildPatternHandler;

impl ActionHandler for BuildPatternHandler {
    fn handle(&self, state: &AppState, request: &ActionRequest) -> Result<serde_json::Value> {
        let pattern_name = request.require_str("pattern")?;
        let version = request.optional_str("version");
        let target_type = request.require_str("targetType")?;

        let root = state
            .patterns
            .pattern(pattern_name, version)?
            .ok_or_else(|| ArtifexError::PatternNotFound {
                pattern: pattern_name.to_string(),
            })?;

        let mut container = match request.optional_str("targetName") {
            Some(name) => match state.factory.get_existing(target_type, name) {
                Ok(existing) => existing,
                Err(ArtifexError::ObjectNotFound { .. }) => {
                    let mut fresh = state.factory.instantiate(target_type)?;
                    fresh.name = name.to_string();
                    fresh
                }
                Err(e) => return Err(e),
            },
            None => state.factory.instantiate(target_type)?,
        };

        let report = state.builder.build(&root, &mut container)?;

        // Structural validation is the pattern source's verdict, not ours
        let valid = state.patterns.validate(pattern_name, &container)?;
        if !valid {
            return Err(ArtifexError::PatternValidationFailed {
                pattern: pattern_name.to_string(),
            });
        }

        state.factory.save(target_type, &container.name, &container)?;

        let skipped: Vec<serde_json::Value> = report
            .skipped
            .iter()
            .map(|s| {
                serde_json::json!({
                    "typeName": s.type_name,
                    "reason": s.reason,
                })
            })
            .collect();
        Ok(serde_json::json!({
            "target": container.name,
            "created": report.created,
            "skipped": skipped,
            "partial": report.is_partial(),
            "valid": valid,
        }))
    }
}
