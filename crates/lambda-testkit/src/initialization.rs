//! Mock initialization context

use lambda_core::{
    EnvironmentResolver, EnvironmentValueProvider, EnvironmentVariable, HandlerError,
    InitializationContext, LifecycleError, ShutdownHook, ShutdownHooks, ShutdownReport,
};
use std::fmt;
use tokio::runtime::Handle;
use tracing::{Instrument, Span};

/// Mock process-scoped context
///
/// Hooks registered through [`InitializationContext::handle_shutdown`] run
/// when the test calls [`shutdown`](Self::shutdown), last registered first.
pub struct MockInitializationContext<E>
where
    E: EnvironmentVariable + 'static,
{
    span: Span,
    scheduler: Handle,
    hooks: ShutdownHooks,
    resolver: EnvironmentResolver<E>,
}

impl<E> MockInitializationContext<E>
where
    E: EnvironmentVariable + 'static,
{
    /// Create a context bound to the given scheduler and resolver
    pub fn new(scheduler: Handle, resolver: EnvironmentResolver<E>) -> Self {
        Self {
            span: tracing::debug_span!("mock_initialization"),
            scheduler,
            hooks: ShutdownHooks::new(),
            resolver,
        }
    }

    /// Number of hooks waiting to run
    pub fn pending_hooks(&self) -> usize {
        self.hooks.len()
    }

    /// Whether [`shutdown`](Self::shutdown) has already run
    pub fn is_shut_down(&self) -> bool {
        self.hooks.is_drained()
    }

    /// Run the registered hooks in reverse registration order
    pub async fn shutdown(&mut self) -> Result<ShutdownReport, LifecycleError> {
        let span = self.span.clone();
        self.hooks.drain(&self.scheduler).instrument(span).await
    }
}

impl<E> InitializationContext for MockInitializationContext<E>
where
    E: EnvironmentVariable + 'static,
{
    fn span(&self) -> &Span {
        &self.span
    }

    fn scheduler(&self) -> &Handle {
        &self.scheduler
    }

    fn handle_shutdown(&mut self, hook: ShutdownHook) -> Result<(), LifecycleError> {
        self.hooks.register(hook)
    }
}

impl<E> EnvironmentValueProvider for MockInitializationContext<E>
where
    E: EnvironmentVariable + 'static,
{
    type Variable = E;

    fn value(&self, variable: &E) -> Result<String, HandlerError> {
        (self.resolver)(variable)
    }
}

impl<E> fmt::Debug for MockInitializationContext<E>
where
    E: EnvironmentVariable + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockInitializationContext")
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
