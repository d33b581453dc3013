//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_CORRELATION_ID: &str = "correlation_id";
pub const FIELD_CONNECTION_ID: &str = "connection_id";

// Domain identifiers
pub const FIELD_ACTION: &str = "action";
pub const FIELD_TYPE_NAME: &str = "type_name";
pub const FIELD_OBJECT_NAME: &str = "object_name";
pub const FIELD_COLLECTION: &str = "collection";
pub const FIELD_PATTERN: &str = "pattern";

// Counts
pub const FIELD_COUNT: &str = "count";
pub const FIELD_SKIPPED: &str = "skipped";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
