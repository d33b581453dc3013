//! Request/response envelopes
//!
//! Wire shape: newline-framed JSON, camelCase keys. The response `id`
//! always echoes the originating request so callers can correlate
//! out-of-order completions on a multiplexed connection. Envelope pairs
//! are transient, one per call.

use serde::{Deserialize, Serialize};

use artifex_core::factory::ParamMap;

/// One inbound request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Correlation id chosen by the caller
    #[serde(default)]
    pub id: String,

    /// Action name, matched case-insensitively against the registry
    pub action: String,

    /// Target kind, for object-scoped actions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    /// Action parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParamMap>,
}

/// One outbound response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Echo of the request's correlation id
    pub id: String,

    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

impl ResponseEnvelope {
    pub fn success(id: impl Into<String>, data: serde_json::Value, elapsed_ms: u64) -> Self {
        Self {
            id: id.into(),
            success: true,
            data: Some(data),
            error: None,
            processing_time_ms: Some(elapsed_ms),
        }
    }

    pub fn failure(id: impl Into<String>, error: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            id: id.into(),
            success: false,
            data: None,
            error: Some(error.into()),
            processing_time_ms: Some(elapsed_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parses_camel_case() {
        let request: RequestEnvelope = serde_json::from_str(
            r#"{"id":"r1","action":"CreateObject","objectType":"Report","parameters":{"name":"q3"}}"#,
        )
        .unwrap();
        assert_eq!(request.id, "r1");
        assert_eq!(request.object_type.as_deref(), Some("Report"));
        assert_eq!(
            request.parameters.unwrap().get("name"),
            Some(&serde_json::json!("q3"))
        );
    }

    #[test]
    fn test_request_minimal_fields() {
        let request: RequestEnvelope = serde_json::from_str(r#"{"action":"Ping"}"#).unwrap();
        assert_eq!(request.id, "");
        assert!(request.object_type.is_none());
        assert!(request.parameters.is_none());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = ResponseEnvelope::failure("r9", "Unknown action: Frobnicate", 2);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], "r9");
        assert_eq!(json["success"], false);
        assert_eq!(json["processingTimeMs"], 2);
        // Absent data is omitted, not null
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_response_round_trip() {
        let response = ResponseEnvelope::success("r2", serde_json::json!({"pong": true}), 1);
        let text = serde_json::to_string(&response).unwrap();
        let parsed: ResponseEnvelope = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.id, "r2");
        assert!(parsed.success);
    }
}
