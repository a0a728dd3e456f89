//! Standard assertion helpers for handler tests

use lambda_core::{BoxError, HandlerError};

/// Assert that a `Result<_, BoxError>` failed with the given [`HandlerError`]
///
/// ```rust
/// use lambda_core::{BoxError, HandlerError};
/// use lambda_testkit::assert_handler_error;
///
/// let result: Result<(), BoxError> = Err(Box::new(HandlerError::EmptyBody));
/// assert_handler_error!(result, HandlerError::EmptyBody);
/// ```
#[macro_export]
macro_rules! assert_handler_error {
    ($result:expr, $expected:expr) => {{
        let expected: $crate::HandlerError = $expected;
        match $crate::assertions::handler_error_of(&$result) {
            $crate::assertions::Failure::Ok => {
                panic!("Expected {:?}, but the result succeeded", expected)
            }
            $crate::assertions::Failure::Opaque(description) => panic!(
                "Expected {:?}, but the error was not a HandlerError: {}",
                expected, description
            ),
            $crate::assertions::Failure::Known(actual) => assert_eq!(
                actual, &expected,
                "Handler error mismatch"
            ),
        }
    }};
}

/// Assert the status code of a wire response
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status_code,
            $status,
            "Unexpected status, body: {:?}",
            $response.body
        )
    };
}

/// How a result failed
#[derive(Debug)]
pub enum Failure<'a> {
    /// It did not fail
    Ok,
    /// It failed with a known error
    Known(&'a HandlerError),
    /// It failed with an opaque error, described
    Opaque(String),
}

/// Classify the failure of a result
pub fn handler_error_of<T>(result: &Result<T, BoxError>) -> Failure<'_> {
    match result {
        Ok(_) => Failure::Ok,
        Err(error) => match HandlerError::classify(error.as_ref()) {
            Some(known) => Failure::Known(known),
            None => Failure::Opaque(error.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_handler_error_matches() {
        let result: Result<u8, BoxError> =
            Err(Box::new(HandlerError::environment_missing("MY_ENV_VARIABLE")));
        assert_handler_error!(
            result,
            HandlerError::environment_missing("MY_ENV_VARIABLE")
        );
    }

    #[test]
    #[should_panic(expected = "not a HandlerError")]
    fn test_assert_handler_error_rejects_opaque() {
        let result: Result<u8, BoxError> = Err("boom".into());
        assert_handler_error!(result, HandlerError::EmptyBody);
    }

    #[test]
    #[should_panic(expected = "the result succeeded")]
    fn test_assert_handler_error_rejects_success() {
        let result: Result<u8, BoxError> = Ok(1);
        assert_handler_error!(result, HandlerError::EmptyBody);
    }
}
