//! Lambda Testing Infrastructure
//!
//! Mock counterparts of the production handlers in `lambda-effects`. Depends
//! only on `lambda-core`, so application handlers can be tested with no
//! dependency on production code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! lambda-testkit = { path = "../lambda-testkit" }
//! ```
//!
//! Then in your tests:
//! ```rust,no_run
//! use lambda_testkit::*;
//!
//! #[test]
//! fn my_test() {
//!     let mut provider = ContextProvider::<&'static str>::new(empty_environment());
//!     provider.set_up().unwrap();
//!     let context = provider.make_context(MockContextConfig::default()).unwrap();
//!     // ... test logic
//!     provider.shut_down().unwrap();
//! }
//! ```

pub mod assertions;
pub mod context;
pub mod environment;
pub mod initialization;
pub mod logging;
pub mod mocked;
pub mod provider;
pub mod wire;

// Re-export commonly used items
pub use context::{
    time_until, MockContext, MockContextConfig, RemainingTimeProvider, DEFAULT_FUNCTION_ARN,
    DEFAULT_TRACE_ID,
};
pub use environment::{empty_environment, environment_from};
pub use initialization::MockInitializationContext;
pub use logging::init_test_tracing;
pub use mocked::{mocked, mocked2, mocked_ok, mocked_unit};
pub use provider::{ContextProvider, ProviderError};
pub use wire::{mock_request, mock_response, RequestBuilder};

// Re-export commonly used core types for convenience
pub use lambda_core::{BoxError, HandlerError, StatusCode};
