//! Lambda Core - Handler Boundary Foundation
//!
//! This crate defines the boundary between a serverless function's business
//! logic and the platform that invokes it. It contains capability traits, the
//! error taxonomy and the wire envelopes; it performs no I/O and reads no
//! process state.
//!
//! # Architecture Layers
//!
//! ## Error Taxonomy
//! - `HandlerError`: failures with a known meaning (empty body, missing
//!   configuration, custom)
//! - `BoxError`: opaque failures from decoding or handler code
//!
//! ## Capability Interfaces (Pure Signatures)
//! - `RuntimeContext`: per-invocation metadata, span, scheduler
//! - `InitializationContext`: process-scoped span, scheduler, shutdown hooks
//! - `EnvironmentValueProvider`: configuration lookup
//! - `EventHandler`, `LambdaCoding`, `HandlerProvider`: application seams
//!
//! ## Wire Envelopes
//! - `ApiGatewayV2Request` / `ApiGatewayV2Response`: HTTP API proxy payloads
//!
//! Production implementations live in `lambda-effects`; mocks in
//! `lambda-testkit`.

#![forbid(unsafe_code)]

// === Core Modules ===

/// Declarative helpers
#[macro_use]
mod macros;

/// Capability trait definitions
pub mod effects;

/// Error taxonomy
pub mod errors;

/// JSON error descriptions
pub mod json;

/// HTTP API proxy envelopes
pub mod wire;

// === Public API Re-exports ===

pub use errors::{BoxError, HandlerError, HandlerResult, LifecycleError};

pub use effects::{
    handler_fn, require_environment, shutdown_hook, DefaultEnvironment, EnvironmentResolver,
    EnvironmentValueProvider, EnvironmentVariable, EventHandler, FunctionContext,
    HandlerProvider, InitializationContext, InvocationState, LambdaCoding, RuntimeContext,
    ShutdownHook, ShutdownHooks, ShutdownReport,
};

pub use wire::{ApiGatewayV2Request, ApiGatewayV2Response, StatusCode};
