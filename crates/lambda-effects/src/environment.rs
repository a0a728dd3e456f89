//! Layer 3: Process Environment Handler - Production Only
//!
//! The single place in the workspace that reads the process environment.
//! Everything else receives an injected [`EnvironmentResolver`].
//!
//! **Layer Constraint**: NO mock resolvers here; injected fixtures belong in
//! `lambda-testkit`.

use lambda_core::effects::{resolve_with, EnvironmentResolver};
use lambda_core::{EnvironmentValueProvider, EnvironmentVariable, HandlerError};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Environment provider backed by the process environment
///
/// Variables that are unset or not valid unicode are reported as missing.
pub struct ProcessEnvironment<E> {
    _variables: PhantomData<fn(&E)>,
}

impl<E> ProcessEnvironment<E>
where
    E: EnvironmentVariable + 'static,
{
    /// Create a new process environment provider
    pub fn new() -> Self {
        Self {
            _variables: PhantomData,
        }
    }

    /// The process environment as an injectable resolver
    pub fn resolver() -> EnvironmentResolver<E> {
        Arc::new(|variable: &E| Self::lookup(variable))
    }

    fn lookup(variable: &E) -> Result<String, HandlerError> {
        // Production resolver: the only sanctioned process-environment read.
        resolve_with(variable, |key| std::env::var(key).ok())
    }
}

impl<E> EnvironmentValueProvider for ProcessEnvironment<E>
where
    E: EnvironmentVariable + 'static,
{
    type Variable = E;

    fn value(&self, variable: &E) -> Result<String, HandlerError> {
        Self::lookup(variable)
    }
}

impl<E> Default for ProcessEnvironment<E>
where
    E: EnvironmentVariable + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ProcessEnvironment<E> {
    fn clone(&self) -> Self {
        Self {
            _variables: PhantomData,
        }
    }
}

impl<E> fmt::Debug for ProcessEnvironment<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProcessEnvironment")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_reports_key() {
        let environment = ProcessEnvironment::<&'static str>::new();
        assert_eq!(
            environment.value(&"LAMBDA_EFFECTS_SURELY_UNSET_VARIABLE"),
            Err(HandlerError::environment_missing(
                "LAMBDA_EFFECTS_SURELY_UNSET_VARIABLE"
            ))
        );
    }

    #[test]
    fn test_resolver_reads_process_environment() {
        std::env::set_var("LAMBDA_EFFECTS_PRESENT_VARIABLE", "present");
        let resolver = ProcessEnvironment::<String>::resolver();
        assert_eq!(
            resolver(&"LAMBDA_EFFECTS_PRESENT_VARIABLE".to_string()).as_deref(),
            Ok("present")
        );
    }
}
