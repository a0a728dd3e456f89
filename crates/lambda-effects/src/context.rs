//! Layer 3: Invocation Context Handler - Production Only
//!
//! Builds the per-invocation [`RuntimeContext`] from the headers the platform
//! attaches to each `next invocation` response.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lambda_effects::LambdaContext;
//!
//! let context = LambdaContext::<MyEnvironment>::from_headers(&headers, Handle::current())?;
//! let table = context.value(&MyEnvironment::TableName)?;
//! ```

use crate::environment::ProcessEnvironment;
use lambda_core::{
    EnvironmentResolver, EnvironmentValueProvider, EnvironmentVariable, HandlerError,
    RuntimeContext,
};
use std::collections::HashMap;
use std::fmt;
use time::OffsetDateTime;
use tokio::runtime::Handle;
use tracing::Span;

/// Invocation header names
pub mod headers {
    /// Identifier of the request being served
    pub const REQUEST_ID: &str = "Lambda-Runtime-Aws-Request-Id";
    /// Deadline in milliseconds since the Unix epoch
    pub const DEADLINE_MS: &str = "Lambda-Runtime-Deadline-Ms";
    /// Identifier of the invoked function, version or alias
    pub const INVOKED_FUNCTION_ARN: &str = "Lambda-Runtime-Invoked-Function-Arn";
    /// Tracing header
    pub const TRACE_ID: &str = "Lambda-Runtime-Trace-Id";
    /// Identity provider data, mobile SDK invocations only
    pub const COGNITO_IDENTITY: &str = "Lambda-Runtime-Cognito-Identity";
    /// Client application data, mobile SDK invocations only
    pub const CLIENT_CONTEXT: &str = "Lambda-Runtime-Client-Context";
}

/// Errors building a context from invocation headers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// A required header is absent
    #[error("Invocation header `{name}` is missing")]
    MissingHeader {
        /// Header name
        name: &'static str,
    },

    /// The deadline header is not a valid millisecond timestamp
    #[error("Invocation deadline `{value}` is not a valid millisecond timestamp")]
    InvalidDeadline {
        /// Raw header value
        value: String,
    },
}

/// Production runtime context for a single invocation
///
/// Environment lookups go to the process environment unless a resolver is
/// injected with [`with_resolver`](Self::with_resolver).
pub struct LambdaContext<E>
where
    E: EnvironmentVariable + 'static,
{
    request_id: String,
    trace_id: String,
    invoked_function_arn: String,
    deadline: OffsetDateTime,
    cognito_identity: Option<String>,
    client_context: Option<String>,
    span: Span,
    scheduler: Handle,
    resolver: EnvironmentResolver<E>,
}

impl<E> LambdaContext<E>
where
    E: EnvironmentVariable + 'static,
{
    /// Build a context from invocation headers
    ///
    /// Header names are matched case-insensitively.
    pub fn from_headers<I, K, V>(headers: I, scheduler: Handle) -> Result<Self, ContextError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let by_name: HashMap<String, String> = headers
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.as_ref().to_string()))
            .collect();
        let optional = |name: &'static str| by_name.get(&name.to_ascii_lowercase()).cloned();
        let required =
            |name: &'static str| optional(name).ok_or(ContextError::MissingHeader { name });

        let request_id = required(headers::REQUEST_ID)?;
        let trace_id = required(headers::TRACE_ID)?;
        let invoked_function_arn = required(headers::INVOKED_FUNCTION_ARN)?;
        let deadline = parse_deadline(&required(headers::DEADLINE_MS)?)?;

        let span = tracing::info_span!(
            "invocation",
            request_id = %request_id,
            trace_id = %trace_id
        );

        Ok(Self {
            request_id,
            trace_id,
            invoked_function_arn,
            deadline,
            cognito_identity: optional(headers::COGNITO_IDENTITY),
            client_context: optional(headers::CLIENT_CONTEXT),
            span,
            scheduler,
            resolver: ProcessEnvironment::<E>::resolver(),
        })
    }

    /// Replace the environment resolver
    pub fn with_resolver(mut self, resolver: EnvironmentResolver<E>) -> Self {
        self.resolver = resolver;
        self
    }
}

fn parse_deadline(value: &str) -> Result<OffsetDateTime, ContextError> {
    let invalid = || ContextError::InvalidDeadline {
        value: value.to_string(),
    };
    let millis: i64 = value.trim().parse().map_err(|_| invalid())?;
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|_| invalid())
}

impl<E> RuntimeContext for LambdaContext<E>
where
    E: EnvironmentVariable + 'static,
{
    fn request_id(&self) -> &str {
        &self.request_id
    }

    fn trace_id(&self) -> &str {
        &self.trace_id
    }

    fn invoked_function_arn(&self) -> &str {
        &self.invoked_function_arn
    }

    fn deadline(&self) -> OffsetDateTime {
        self.deadline
    }

    fn cognito_identity(&self) -> Option<&str> {
        self.cognito_identity.as_deref()
    }

    fn client_context(&self) -> Option<&str> {
        self.client_context.as_deref()
    }

    fn span(&self) -> &Span {
        &self.span
    }

    fn scheduler(&self) -> &Handle {
        &self.scheduler
    }
}

impl<E> EnvironmentValueProvider for LambdaContext<E>
where
    E: EnvironmentVariable + 'static,
{
    type Variable = E;

    fn value(&self, variable: &E) -> Result<String, HandlerError> {
        (self.resolver)(variable)
    }
}

impl<E> fmt::Debug for LambdaContext<E>
where
    E: EnvironmentVariable + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaContext")
            .field("request_id", &self.request_id)
            .field("trace_id", &self.trace_id)
            .field("invoked_function_arn", &self.invoked_function_arn)
            .field("deadline", &self.deadline)
            .field("cognito_identity", &self.cognito_identity)
            .field("client_context", &self.client_context)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample_headers() -> Vec<(&'static str, &'static str)> {
        vec![
            ("lambda-runtime-aws-request-id", "8476a536-e9f4-11e8-9739-2dfe598c3fcd"),
            ("Lambda-Runtime-Deadline-Ms", "1542409706888"),
            (
                "Lambda-Runtime-Invoked-Function-Arn",
                "arn:aws:lambda:us-east-2:123456789012:function:custom-runtime",
            ),
            (
                "LAMBDA-RUNTIME-TRACE-ID",
                "Root=1-5bef4de7-ad49b0e87f6ef6c87fc2e700;Parent=9a9197af755a6419;Sampled=1",
            ),
        ]
    }

    #[tokio::test]
    async fn test_from_headers() {
        let context =
            LambdaContext::<&'static str>::from_headers(sample_headers(), Handle::current())
                .unwrap();

        assert_eq!(context.request_id(), "8476a536-e9f4-11e8-9739-2dfe598c3fcd");
        assert!(context.trace_id().starts_with("Root=1-5bef4de7"));
        assert_eq!(
            context.deadline().unix_timestamp_nanos(),
            1_542_409_706_888_000_000
        );
        assert!(context.cognito_identity().is_none());
        assert!(context.client_context().is_none());
        assert!(context.remaining_time().is_negative());
    }

    #[tokio::test]
    async fn test_missing_header() {
        let without_trace = sample_headers()
            .into_iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case(headers::TRACE_ID));
        let result = LambdaContext::<&'static str>::from_headers(without_trace, Handle::current());
        assert_eq!(
            result.unwrap_err(),
            ContextError::MissingHeader {
                name: headers::TRACE_ID
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_deadline() {
        let mut invalid = sample_headers();
        invalid[1].1 = "soon";
        let result = LambdaContext::<&'static str>::from_headers(invalid, Handle::current());
        assert_eq!(
            result.unwrap_err(),
            ContextError::InvalidDeadline {
                value: "soon".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_injected_resolver() {
        let resolver: EnvironmentResolver<&'static str> =
            Arc::new(|key: &&'static str| Ok::<_, HandlerError>(format!("{key}=injected")));
        let context =
            LambdaContext::<&'static str>::from_headers(sample_headers(), Handle::current())
                .unwrap()
                .with_resolver(resolver);
        assert_eq!(context.value(&"TABLE").as_deref(), Ok("TABLE=injected"));
    }
}
