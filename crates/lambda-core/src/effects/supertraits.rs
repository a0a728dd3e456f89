//! Composite capabilities
//!
//! Convenience supertraits combining other capabilities; no handlers needed.

use super::environment::EnvironmentValueProvider;
use super::runtime::RuntimeContext;

/// Everything a handler may learn about its invocation
///
/// Who am I, what is my deadline, what is my configuration. Handlers that need
/// configuration ask for it here so tests can substitute values.
pub trait FunctionContext: RuntimeContext + EnvironmentValueProvider {}

impl<T> FunctionContext for T where T: RuntimeContext + EnvironmentValueProvider {}
