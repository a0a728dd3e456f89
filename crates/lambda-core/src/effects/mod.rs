//! Layer 1: Capability Trait Definitions
//!
//! Pure trait definitions for everything a handler may ask of its platform.
//! This module defines **what** capabilities exist; handlers define **how**.
//!
//! # Capability Classification
//!
//! ## Infrastructure Capabilities (production: `lambda-effects`, mock: `lambda-testkit`)
//! - **Runtime**: per-invocation metadata, span and scheduler
//! - **Initialization**: process-scoped span, scheduler and shutdown hooks
//! - **Environment**: configuration lookup through an injected resolver
//!
//! ## Application Capabilities (implemented by application code)
//! - **Handler**: computes an output from an event
//! - **Coding**: translates wire envelopes to and from application types
//! - **Provider**: composes a coder with a handler factory
//!
//! ## Composite Capabilities
//! - **FunctionContext**: runtime + environment
//!
//! Production and mock contexts implement the same traits independently;
//! neither derives from the other.

pub mod coding;
pub mod environment;
pub mod handler;
pub mod initialization;
pub mod provider;
pub mod runtime;
pub mod supertraits;

pub use coding::LambdaCoding;
pub use environment::{
    require_environment, resolve_with, DefaultEnvironment, EnvironmentResolver,
    EnvironmentValueProvider, EnvironmentVariable,
};
pub use handler::{handler_fn, EventHandler, HandlerFn};
pub use initialization::{
    shutdown_hook, InitializationContext, ShutdownFuture, ShutdownHook, ShutdownHooks,
    ShutdownReport,
};
pub use provider::{HandlerProvider, InvocationState, WireEventOf, WireOutputOf};
pub use runtime::RuntimeContext;
pub use supertraits::FunctionContext;
