use artifex_core_types::{ConnectionId, CorrelationId};
use thiserror::Error;

/// Result type alias using ArtifexError
pub type Result<T> = std::result::Result<T, ArtifexError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the Artifex system. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and response envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxErrorKind {
    /// A type, object, collection, or pattern is absent
    NotFound,
    /// A required parameter is missing, a format constraint failed, or a
    /// pattern-node type is unresolvable at the root
    Validation,
    /// The external metadata/storage backend is unreachable
    ProviderUnavailable,
    /// A pattern build completed with some nodes skipped
    PartialFailure,
    /// No response within the configured deadline
    Timeout,
    /// The request named an action no handler is registered for
    UnknownAction,
    /// A surface declared on the protocol but not implemented in this build
    NotImplemented,
    /// JSON encoding/decoding failure
    Serialization,
    /// Unexpected fault
    Internal,
}

impl AxErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            AxErrorKind::NotFound => "ERR_NOT_FOUND",
            AxErrorKind::Validation => "ERR_VALIDATION",
            AxErrorKind::ProviderUnavailable => "ERR_PROVIDER_UNAVAILABLE",
            AxErrorKind::PartialFailure => "ERR_PARTIAL_FAILURE",
            AxErrorKind::Timeout => "ERR_TIMEOUT",
            AxErrorKind::UnknownAction => "ERR_UNKNOWN_ACTION",
            AxErrorKind::NotImplemented => "ERR_NOT_IMPLEMENTED",
            AxErrorKind::Serialization => "ERR_SERIALIZATION",
            AxErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Structured representation of an error with classification fields for
/// programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct AxError {
    kind: AxErrorKind,
    op: Option<String>,
    type_name: Option<String>,
    object_name: Option<String>,
    correlation_id: Option<CorrelationId>,
    connection_id: Option<ConnectionId>,
    message: String,
}

impl AxError {
    /// Create a new error with the specified kind
    pub fn new(kind: AxErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_name: None,
            object_name: None,
            correlation_id: None,
            connection_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the type name the operation concerned
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add the object name the operation concerned
    pub fn with_object_name(mut self, object_name: impl Into<String>) -> Self {
        self.object_name = Some(object_name.into());
        self
    }

    /// Add correlation id context
    pub fn with_correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Add connection id context
    pub fn with_connection_id(mut self, connection_id: ConnectionId) -> Self {
        self.connection_id = Some(connection_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> AxErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the type name context, if any
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Get the object name context, if any
    pub fn object_name(&self) -> Option<&str> {
        self.object_name.as_deref()
    }

    /// Get the correlation id context, if any
    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        self.correlation_id.as_ref()
    }

    /// Get the connection id context, if any
    pub fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(object_name) = &self.object_name {
            write!(f, " (object: {})", object_name)?;
        }
        Ok(())
    }
}

impl std::error::Error for AxError {}

// ========== End Error Facility ==========

/// Comprehensive error taxonomy for Artifex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArtifexError {
    // ===== Lookup Errors =====
    /// Type name not known to the catalog
    #[error("Unknown object type: {type_name}")]
    TypeNotFound { type_name: String },

    /// Object not found in the storage provider
    #[error("Object not found: {type_name}/{name}")]
    ObjectNotFound { type_name: String, name: String },

    /// Named collection absent on the inspected type
    #[error("Collection not found: {collection} on {type_name}")]
    CollectionNotFound {
        type_name: String,
        collection: String,
    },

    /// Pattern absent from the pattern library
    #[error("Pattern not found: {pattern}")]
    PatternNotFound { pattern: String },

    // ===== Validation Errors =====
    /// Creation parameter declared required but not supplied
    #[error("Required parameter missing: {parameter} for type {type_name}")]
    RequiredParameterMissing {
        type_name: String,
        parameter: String,
    },

    /// Parameter value fails its declared format constraint
    #[error("Parameter {parameter} does not match required format {format}")]
    ParameterFormatMismatch { parameter: String, format: String },

    /// Property name not declared by the type
    #[error("Unknown property {property} on type {type_name}")]
    UnknownProperty {
        type_name: String,
        property: String,
    },

    /// Attempt to set a read-only property
    #[error("Property {property} on type {type_name} is read-only")]
    ReadOnlyProperty {
        type_name: String,
        property: String,
    },

    /// Pattern root node names a type that cannot be instantiated
    #[error("Pattern node type is unresolvable: {type_name}")]
    PatternNodeUnresolvable { type_name: String },

    /// Structural validation predicate rejected the built tree
    #[error("Pattern validation failed: {pattern}")]
    PatternValidationFailed { pattern: String },

    // ===== Boundary Errors =====
    /// External metadata/storage backend is unreachable
    #[error("Provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },

    /// Build completed but some nodes were skipped
    #[error("Pattern build partially failed: {skipped} of {total} nodes skipped")]
    PartialFailure { skipped: usize, total: usize },

    /// Deadline elapsed before the handler produced a response
    #[error("Action {action} timed out after {elapsed_ms}ms")]
    Timeout { action: String, elapsed_ms: u64 },

    /// No handler registered for the requested action
    #[error("Unknown action: {action}")]
    UnknownAction { action: String },

    /// Declared on the protocol surface, not implemented in this build
    #[error("Not implemented: {feature}")]
    NotImplemented { feature: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from ArtifexError to AxError
///
/// Maps each granular variant onto the canonical kind taxonomy while
/// preserving the context fields the variant carries.
impl From<ArtifexError> for AxError {
    fn from(err: ArtifexError) -> Self {
        match err {
            ArtifexError::TypeNotFound { type_name } => AxError::new(AxErrorKind::NotFound)
                .with_type_name(type_name)
                .with_message("Unknown object type"),

            ArtifexError::ObjectNotFound { type_name, name } => {
                AxError::new(AxErrorKind::NotFound)
                    .with_type_name(type_name)
                    .with_object_name(name)
                    .with_message("Object not found")
            }

            ArtifexError::CollectionNotFound {
                type_name,
                collection,
            } => AxError::new(AxErrorKind::NotFound)
                .with_type_name(type_name)
                .with_message(format!("Collection not found: {}", collection)),

            ArtifexError::PatternNotFound { pattern } => AxError::new(AxErrorKind::NotFound)
                .with_message(format!("Pattern not found: {}", pattern)),

            ArtifexError::RequiredParameterMissing {
                type_name,
                parameter,
            } => AxError::new(AxErrorKind::Validation)
                .with_type_name(type_name)
                .with_message(format!("Required parameter missing: {}", parameter)),

            ArtifexError::ParameterFormatMismatch { parameter, format } => {
                AxError::new(AxErrorKind::Validation).with_message(format!(
                    "Parameter {} does not match required format {}",
                    parameter, format
                ))
            }

            ArtifexError::UnknownProperty {
                type_name,
                property,
            } => AxError::new(AxErrorKind::Validation)
                .with_type_name(type_name)
                .with_message(format!("Unknown property: {}", property)),

            ArtifexError::ReadOnlyProperty {
                type_name,
                property,
            } => AxError::new(AxErrorKind::Validation)
                .with_type_name(type_name)
                .with_message(format!("Property is read-only: {}", property)),

            ArtifexError::PatternNodeUnresolvable { type_name } => {
                AxError::new(AxErrorKind::Validation)
                    .with_type_name(type_name)
                    .with_message("Pattern node type is unresolvable")
            }

            ArtifexError::PatternValidationFailed { pattern } => {
                AxError::new(AxErrorKind::Validation)
                    .with_message(format!("Pattern validation failed: {}", pattern))
            }

            ArtifexError::ProviderUnavailable { reason } => {
                AxError::new(AxErrorKind::ProviderUnavailable).with_message(reason)
            }

            ArtifexError::PartialFailure { skipped, total } => {
                AxError::new(AxErrorKind::PartialFailure).with_message(format!(
                    "{} of {} nodes skipped",
                    skipped, total
                ))
            }

            ArtifexError::Timeout { action, elapsed_ms } => AxError::new(AxErrorKind::Timeout)
                .with_op(action)
                .with_message(format!("Timed out after {}ms", elapsed_ms)),

            ArtifexError::UnknownAction { action } => AxError::new(AxErrorKind::UnknownAction)
                .with_message(format!("Unknown action: {}", action)),

            ArtifexError::NotImplemented { feature } => AxError::new(AxErrorKind::NotImplemented)
                .with_message(format!("Not implemented: {}", feature)),

            ArtifexError::Serialization { message } => {
                AxError::new(AxErrorKind::Serialization).with_message(message)
            }

            ArtifexError::Internal { message } => {
                AxError::new(AxErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to ArtifexError
impl From<serde_json::Error> for ArtifexError {
    fn from(err: serde_json::Error) -> Self {
        ArtifexError::Serialization {
            message: err.to_string(),
        }
    }
}
