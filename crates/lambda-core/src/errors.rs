//! Error taxonomy for Lambda handlers
//!
//! `HandlerError` is the closed set of failures the coding layer knows how to
//! classify. Anything else raised by decoding or by handler code travels as an
//! opaque [`BoxError`] and is answered with a generic internal error.

use serde::{Deserialize, Serialize};

/// Opaque error raised by decoding, handler code or body projections
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of handler code, decoding and projections
pub type HandlerResult<T> = std::result::Result<T, BoxError>;

/// Failures with a known meaning at the function boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum HandlerError {
    /// The wire event carried no body
    #[error("The AWS event did not contain a body.")]
    EmptyBody,

    /// A recognized configuration variable is absent
    #[error("The environment does not contain the expected variable `{name}`.")]
    EnvironmentMissing {
        /// Key of the missing variable, exactly as requested
        name: String,
    },

    /// Failure raised by application code
    #[error("{}", .message.as_deref().unwrap_or("An unspecified error occurred."))]
    Custom {
        /// Optional human-readable message
        message: Option<String>,
    },
}

impl HandlerError {
    /// Create a custom error carrying a message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: Some(message.into()),
        }
    }

    /// Create a custom error without a message
    pub fn custom_empty() -> Self {
        Self::Custom { message: None }
    }

    /// Create a missing environment variable error
    pub fn environment_missing(name: impl Into<String>) -> Self {
        Self::EnvironmentMissing { name: name.into() }
    }

    /// Classify an opaque error, if it is one of ours
    ///
    /// Only the top-level error is inspected; wrapped sources stay opaque.
    pub fn classify<'a>(
        error: &'a (dyn std::error::Error + Send + Sync + 'static),
    ) -> Option<&'a Self> {
        error.downcast_ref::<Self>()
    }
}

/// Errors from the shutdown-hook stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum LifecycleError {
    /// Teardown has already drained the hook stack
    #[error("Shutdown hooks have already been run")]
    AlreadyShutDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_descriptions() {
        assert_eq!(
            HandlerError::EmptyBody.to_string(),
            "The AWS event did not contain a body."
        );
        assert_eq!(
            HandlerError::environment_missing("MY_ENV_VARIABLE").to_string(),
            "The environment does not contain the expected variable `MY_ENV_VARIABLE`."
        );
        assert_eq!(
            HandlerError::custom("My error message").to_string(),
            "My error message"
        );
        assert_eq!(
            HandlerError::custom_empty().to_string(),
            "An unspecified error occurred."
        );
    }

    #[test]
    fn test_classify_boxed_error() {
        let boxed: BoxError = Box::new(HandlerError::EmptyBody);
        assert_eq!(
            HandlerError::classify(boxed.as_ref()),
            Some(&HandlerError::EmptyBody)
        );

        let opaque: BoxError = "something else".into();
        assert!(HandlerError::classify(opaque.as_ref()).is_none());
    }

    #[test]
    fn test_classified_error_borrows_from_input() {
        fn missing_name(error: &BoxError) -> Option<&str> {
            match HandlerError::classify(error.as_ref())? {
                HandlerError::EnvironmentMissing { name } => Some(name.as_str()),
                _ => None,
            }
        }

        let boxed: BoxError = Box::new(HandlerError::environment_missing("TABLE_NAME"));
        assert_eq!(missing_name(&boxed), Some("TABLE_NAME"));
    }

    #[test]
    fn test_classify_ignores_sources() {
        #[derive(Debug, thiserror::Error)]
        #[error("wrapper")]
        struct Wrapper(#[source] HandlerError);

        let boxed: BoxError = Box::new(Wrapper(HandlerError::EmptyBody));
        assert!(HandlerError::classify(boxed.as_ref()).is_none());
    }
}
