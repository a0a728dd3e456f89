//! Environment capability
//!
//! Handlers learn their configuration through [`EnvironmentValueProvider`]
//! instead of reading process state. Production contexts resolve against the
//! process environment; test contexts receive an injected resolver.

use crate::errors::HandlerError;
use std::sync::Arc;

/// A recognized configuration key
///
/// Usually implemented by a handler-specific enum declared with
/// [`environment_variables!`](crate::environment_variables).
pub trait EnvironmentVariable: Send + Sync {
    /// The variable name as it appears in the environment
    fn key(&self) -> &str;
}

impl EnvironmentVariable for String {
    fn key(&self) -> &str {
        self
    }
}

impl EnvironmentVariable for &'static str {
    fn key(&self) -> &str {
        self
    }
}

/// Injected resolver returning the value of a variable
pub type EnvironmentResolver<E> =
    Arc<dyn Fn(&E) -> Result<String, HandlerError> + Send + Sync + 'static>;

/// Capability returning values for environment variables
pub trait EnvironmentValueProvider: Send + Sync {
    /// The closed set of variables this provider answers for
    type Variable: EnvironmentVariable;

    /// Returns the value of the given variable
    ///
    /// Fails with [`HandlerError::EnvironmentMissing`] carrying the variable's
    /// key when it is absent.
    fn value(&self, variable: &Self::Variable) -> Result<String, HandlerError>;
}

/// Resolve a variable through a lookup function
///
/// Shared by every resolver so that a miss always reports the exact key.
pub fn resolve_with<E, F>(variable: &E, lookup: F) -> Result<String, HandlerError>
where
    E: EnvironmentVariable + ?Sized,
    F: FnOnce(&str) -> Option<String>,
{
    let key = variable.key();
    lookup(key).ok_or_else(|| HandlerError::environment_missing(key))
}

/// Check that every listed variable resolves
///
/// Returns the first [`HandlerError::EnvironmentMissing`] encountered.
pub fn require_environment<P>(provider: &P, variables: &[P::Variable]) -> Result<(), HandlerError>
where
    P: EnvironmentValueProvider + ?Sized,
{
    for variable in variables {
        provider.value(variable)?;
    }
    Ok(())
}

crate::environment_variables! {
    /// Variables read by the library itself
    pub enum DefaultEnvironment {
        /// The log level of the function's logger
        LogLevel => "LOG_LEVEL",
    }
}
