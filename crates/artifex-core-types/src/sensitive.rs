//! Sensitive data marker for automatic redaction
//!
//! Request parameter maps can carry credentials for the external backend
//! (connection strings, tokens). The `Sensitive<T>` wrapper ensures such
//! values are never accidentally logged or displayed.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use artifex_core_types::Sensitive;
///
/// let token = Sensitive::new("backend-token-9f2");
/// println!("{:?}", token); // Prints: ***REDACTED***
/// println!("{}", token);   // Prints: ***REDACTED***
///
/// // Access the actual value when needed
/// assert_eq!(token.expose(), &"backend-token-9f2");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    ///
    /// Use this method sparingly and only at the point where the value
    /// is actually handed to the backend.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_debug_redaction() {
        let secret = Sensitive::new("backend-connection-string");
        let debug_str = format!("{:?}", secret);
        assert_eq!(debug_str, "***REDACTED***");
        assert!(!debug_str.contains("connection-string"));
    }

    #[test]
    fn test_sensitive_display_redaction() {
        let secret = Sensitive::new("token-12345");
        let display_str = format!("{}", secret);
        assert_eq!(display_str, "***REDACTED***");
        assert!(!display_str.contains("token"));
    }

    #[test]
    fn test_sensitive_expose_and_into_inner() {
        let secret = Sensitive::new(String::from("value"));
        assert_eq!(secret.expose(), "value");
        assert_eq!(secret.into_inner(), "value");
    }

    #[test]
    fn test_sensitive_from() {
        let secret: Sensitive<u32> = 7.into();
        assert_eq!(secret.expose(), &7);
    }

    #[test]
    fn test_sensitive_inside_struct() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct BackendAuth {
            endpoint: String,
            token: Sensitive<String>,
        }

        let auth = BackendAuth {
            endpoint: "tcp://meta:7001".to_string(),
            token: Sensitive::new("s3cret".to_string()),
        };

        let debug_str = format!("{:?}", auth);
        assert!(debug_str.contains("tcp://meta:7001"));
        assert!(debug_str.contains("***REDACTED***"));
        assert!(!debug_str.contains("s3cret"));
    }
}
