//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use artifex_core::log_op_start;
/// log_op_start!("create_object");
/// log_op_start!("create_object", type_name = "Widget");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = artifex_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = artifex_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use artifex_core::log_op_end;
/// log_op_end!("create_object", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = artifex_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = artifex_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```ignore
/// # use artifex_core::{log_op_error, errors::ArtifexError};
/// let err = ArtifexError::TypeNotFound { type_name: "Widget".to_string() };
/// log_op_error!("get_type", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::AxError;
        let ax_err: AxError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = artifex_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ax_err.kind(),
            err_code = ax_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::AxError;
        let ax_err: AxError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = artifex_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ax_err.kind(),
            err_code = ax_err.code(),
            $($field)*
        );
    }};
}
