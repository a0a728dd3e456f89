//! Mock runtime context
//!
//! Same capability surface as the production context, with every field under
//! the test's control. Identifiers default to fixed or freshly generated
//! values; the deadline derives from a timeout.

use lambda_core::{
    EnvironmentResolver, EnvironmentValueProvider, EnvironmentVariable, HandlerError,
    RuntimeContext,
};
use std::fmt;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::runtime::Handle;
use tracing::Span;
use uuid::Uuid;

/// Trace header used when the test does not supply one
pub const DEFAULT_TRACE_ID: &str =
    "Root=1-00000000-000000000000000000000000;Parent=0000000000000000;Sampled=1";

/// Function identifier used when the test does not supply one
pub const DEFAULT_FUNCTION_ARN: &str =
    "arn:aws:lambda:us-east-1:123456789012:function:custom-runtime";

/// Closure computing the remaining time from a deadline
pub type RemainingTimeProvider = Arc<dyn Fn(OffsetDateTime) -> Duration + Send + Sync + 'static>;

/// Time from now until `deadline`, negative once it has passed
pub fn time_until(deadline: OffsetDateTime) -> Duration {
    deadline - OffsetDateTime::now_utc()
}

/// Configuration for a [`MockContext`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockContextConfig {
    /// The request ID
    pub request_id: String,
    /// The tracing header
    pub trace_id: String,
    /// The identifier of the invoked function
    pub invoked_function_arn: String,
    /// Time between context creation and its deadline
    pub timeout: Duration,
    /// Identity provider data
    pub cognito_identity: Option<String>,
    /// Client application data
    pub client_context: Option<String>,
}

impl Default for MockContextConfig {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            trace_id: DEFAULT_TRACE_ID.to_string(),
            invoked_function_arn: DEFAULT_FUNCTION_ARN.to_string(),
            timeout: Duration::seconds(5),
            cognito_identity: None,
            client_context: None,
        }
    }
}

impl MockContextConfig {
    /// Set the request ID
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Set the tracing header
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    /// Set the function identifier
    pub fn with_invoked_function_arn(mut self, arn: impl Into<String>) -> Self {
        self.invoked_function_arn = arn.into();
        self
    }

    /// Set the timeout; negative values produce an already expired deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the identity provider data
    pub fn with_cognito_identity(mut self, identity: impl Into<String>) -> Self {
        self.cognito_identity = Some(identity.into());
        self
    }

    /// Set the client application data
    pub fn with_client_context(mut self, client_context: impl Into<String>) -> Self {
        self.client_context = Some(client_context.into());
        self
    }
}

/// Mock per-invocation context
pub struct MockContext<E>
where
    E: EnvironmentVariable + 'static,
{
    /// The request ID
    pub request_id: String,
    /// The tracing header
    pub trace_id: String,
    /// The identifier of the invoked function
    pub invoked_function_arn: String,
    /// The instant at which the invocation times out
    pub deadline: OffsetDateTime,
    /// Identity provider data
    pub cognito_identity: Option<String>,
    /// Client application data
    pub client_context: Option<String>,
    /// Span to log with
    pub span: Span,
    /// Scheduler handle
    pub scheduler: Handle,
    /// Closure answering [`RuntimeContext::remaining_time`]
    pub remaining_time_provider: RemainingTimeProvider,
    /// Injected environment resolver
    pub resolver: EnvironmentResolver<E>,
}

impl<E> MockContext<E>
where
    E: EnvironmentVariable + 'static,
{
    /// Create a context from a configuration
    ///
    /// The deadline is `now + timeout`, saturating at the representable range.
    pub fn new(
        config: MockContextConfig,
        scheduler: Handle,
        resolver: EnvironmentResolver<E>,
    ) -> Self {
        let span = tracing::debug_span!(
            "mock_invocation",
            request_id = %config.request_id,
            trace_id = %config.trace_id
        );
        Self {
            deadline: OffsetDateTime::now_utc().saturating_add(config.timeout),
            request_id: config.request_id,
            trace_id: config.trace_id,
            invoked_function_arn: config.invoked_function_arn,
            cognito_identity: config.cognito_identity,
            client_context: config.client_context,
            span,
            scheduler,
            remaining_time_provider: Arc::new(time_until),
            resolver,
        }
    }

    /// Replace the remaining-time closure
    pub fn with_remaining_time_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(OffsetDateTime) -> Duration + Send + Sync + 'static,
    {
        self.remaining_time_provider = Arc::new(provider);
        self
    }

    /// Replace the environment resolver
    pub fn with_resolver(mut self, resolver: EnvironmentResolver<E>) -> Self {
        self.resolver = resolver;
        self
    }
}

impl<E> RuntimeContext for MockContext<E>
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

    fn remaining_time(&self) -> Duration {
        (self.remaining_time_provider)(self.deadline)
    }
}

impl<E> EnvironmentValueProvider for MockContext<E>
where
    E: EnvironmentVariable + 'static,
{
    type Variable = E;

    fn value(&self, variable: &E) -> Result<String, HandlerError> {
        (self.resolver)(variable)
    }
}

impl<E> fmt::Debug for MockContext<E>
where
    E: EnvironmentVariable + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockContext")
            .field("request_id", &self.request_id)
            .field("trace_id", &self.trace_id)
            .field("invoked_function_arn", &self.invoked_function_arn)
            .field("deadline", &self.deadline)
            .field("cognito_identity", &self.cognito_identity)
            .field("client_context", &self.client_context)
            .finish_non_exhaustive()
    }
}
