//! Injected environment fixtures
//!
//! Resolvers backed by a fixed map. Lookups of absent keys fail with
//! `HandlerError::EnvironmentMissing` carrying the key.

use lambda_core::effects::resolve_with;
use lambda_core::{EnvironmentResolver, EnvironmentVariable};
use std::collections::HashMap;
use std::sync::Arc;

/// Resolver answering from the given key/value pairs
///
/// ```rust
/// use lambda_testkit::environment_from;
///
/// let resolver = environment_from::<&'static str, _, _>([("TABLE_NAME", "greetings")]);
/// assert_eq!(resolver(&"TABLE_NAME").unwrap(), "greetings");
/// assert!(resolver(&"REGION").is_err());
/// ```
pub fn environment_from<E, K, V>(
    pairs: impl IntoIterator<Item = (K, V)>,
) -> EnvironmentResolver<E>
where
    E: EnvironmentVariable + 'static,
    K: Into<String>,
    V: Into<String>,
{
    let values: HashMap<String, String> = pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Arc::new(move |variable: &E| resolve_with(variable, |key| values.get(key).cloned()))
}

/// Resolver for which every variable is missing
pub fn empty_environment<E>() -> EnvironmentResolver<E>
where
    E: EnvironmentVariable + 'static,
{
    Arc::new(|variable: &E| resolve_with(variable, |_| None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_core::{DefaultEnvironment, HandlerError};

    #[test]
    fn test_missing_key_is_reported_exactly() {
        let resolver = empty_environment::<&'static str>();
        assert_eq!(
            resolver(&"MY_ENV_VARIABLE"),
            Err(HandlerError::environment_missing("MY_ENV_VARIABLE"))
        );
    }

    #[test]
    fn test_declared_variables() {
        let resolver = environment_from::<DefaultEnvironment, _, _>([("LOG_LEVEL", "trace")]);
        assert_eq!(
            resolver(&DefaultEnvironment::LogLevel).as_deref(),
            Ok("trace")
        );
    }
}
