//! Lambda Effects - Production Handlers
//!
//! Production implementations of the capability traits in `lambda-core`:
//!
//! - [`LambdaContext`]: per-invocation context built from invocation headers
//! - [`LambdaInitializationContext`]: process-scoped context owning shutdown hooks
//! - [`ProcessEnvironment`]: the only reader of the process environment
//! - [`ApiGatewayCoder`]: HTTP API proxy coding with the status mapping table
//! - [`invoke`] / [`invoke_recorded`]: the invocation state machine, panics included
//! - [`init_tracing`]: global subscriber bootstrap
//!
//! Mock counterparts live in `lambda-testkit`, which never depends on this crate.

#![forbid(unsafe_code)]

/// HTTP API proxy coder
pub mod coder;

/// Production runtime context
pub mod context;

/// Process environment resolver
pub mod environment;

/// Production initialization context
pub mod initialization;

/// Invocation driver
pub mod invocation;

/// Logging bootstrap
pub mod logging;

pub use coder::{
    default_error_body, fallback_response, status_for, ApiGatewayCoder, ErrorBody, ResponseBody,
    FALLBACK_ERROR_BODY,
};
pub use context::{ContextError, LambdaContext};
pub use environment::ProcessEnvironment;
pub use initialization::LambdaInitializationContext;
pub use invocation::{invoke, invoke_recorded, InvocationPanic, InvocationRecord};
pub use logging::{init_tracing, parse_level, LoggingConfig, LoggingError};
