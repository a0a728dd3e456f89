//! Per-invocation runtime context
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `lambda-effects` (production), `lambda-testkit` (mock)
//! - **Usage**: Handler code that needs invocation metadata
//!
//! One context exists per invocation. It is created by the platform (or the
//! mock provider) before the handler runs and never mutated afterwards.

use time::{Duration, OffsetDateTime};
use tokio::runtime::Handle;
use tracing::Span;

/// Read-only view of the invocation the handler is serving
pub trait RuntimeContext: Send + Sync {
    /// The request ID, which identifies the request that triggered the invocation
    fn request_id(&self) -> &str;

    /// The tracing header for the invocation
    fn trace_id(&self) -> &str;

    /// The identifier of the function, version or alias that was invoked
    fn invoked_function_arn(&self) -> &str;

    /// The instant at which the function times out
    fn deadline(&self) -> OffsetDateTime;

    /// Data about the identity provider, for invocations from mobile SDKs
    fn cognito_identity(&self) -> Option<&str>;

    /// Data about the client application and device, for invocations from mobile SDKs
    fn client_context(&self) -> Option<&str>;

    /// Span to log with
    fn span(&self) -> &Span;

    /// Scheduler used to spawn cooperating work
    ///
    /// The scheduler is shared with the runtime; never block on it.
    fn scheduler(&self) -> &Handle;

    /// Time left until [`deadline`](Self::deadline)
    ///
    /// Not clamped: an expired deadline yields a negative duration.
    fn remaining_time(&self) -> Duration {
        self.deadline() - OffsetDateTime::now_utc()
    }
}
