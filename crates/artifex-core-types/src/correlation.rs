//! Correlation types for pairing requests with responses
//!
//! Every request envelope carries a correlation id chosen by the caller;
//! the matching response must echo it so out-of-order completions can be
//! paired on a multiplexed connection. These types also propagate through
//! logging so a single request can be followed across task boundaries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier pairing a request envelope to its response
///
/// Normally supplied by the caller inside the envelope; `new()` generates
/// one (UUIDv7) for internally-originated operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a fresh random CorrelationId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Adopt a caller-supplied id verbatim
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// True when the caller supplied no usable id
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for one accepted client connection
///
/// Generated server-side when a connection is accepted; requests arriving
/// on the same connection share it in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Generate a fresh random ConnectionId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through operation boundaries for correlation
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: CorrelationId,
    pub connection_id: Option<ConnectionId>,
}

impl RequestContext {
    /// Create a new context with a fresh CorrelationId
    pub fn new() -> Self {
        Self {
            correlation_id: CorrelationId::new(),
            connection_id: None,
        }
    }

    /// Create a context around a caller-supplied correlation id
    pub fn with_correlation_id(correlation_id: CorrelationId) -> Self {
        Self {
            correlation_id,
            connection_id: None,
        }
    }

    /// Attach the accepting connection's id
    pub fn with_connection_id(mut self, connection_id: ConnectionId) -> Self {
        self.connection_id = Some(connection_id);
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
