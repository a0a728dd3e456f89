//! Layer 3: Initialization Context Handler - Production Only
//!
//! Process-scoped context handed to handler construction code. Owns the
//! shutdown-hook stack and drains it once on [`shutdown`](LambdaInitializationContext::shutdown).

use lambda_core::{
    InitializationContext, LifecycleError, ShutdownHook, ShutdownHooks, ShutdownReport,
};
use tokio::runtime::Handle;
use tracing::{Instrument, Span};

/// Production initialization context
#[derive(Debug)]
pub struct LambdaInitializationContext {
    span: Span,
    scheduler: Handle,
    hooks: ShutdownHooks,
}

impl LambdaInitializationContext {
    /// Create a context bound to the given scheduler
    pub fn new(scheduler: Handle) -> Self {
        Self {
            span: tracing::info_span!("initialization"),
            scheduler,
            hooks: ShutdownHooks::new(),
        }
    }

    /// Create a context bound to the current tokio runtime
    ///
    /// Returns `None` outside a runtime.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Number of registered hooks waiting for teardown
    pub fn pending_hooks(&self) -> usize {
        self.hooks.len()
    }

    /// Run every registered hook, last registered first
    ///
    /// Fails with [`LifecycleError::AlreadyShutDown`] when called twice.
    pub async fn shutdown(&mut self) -> Result<ShutdownReport, LifecycleError> {
        tracing::info!(parent: &self.span, hooks = self.hooks.len(), "shutting down");
        let span = self.span.clone();
        self.hooks.drain(&self.scheduler).instrument(span).await
    }
}

impl InitializationContext for LambdaInitializationContext {
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

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_core::{shutdown_hook, BoxError};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_shutdown_runs_hooks_in_reverse() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut context = LambdaInitializationContext::current().unwrap();

        for label in ["database", "cache", "client"] {
            let log = log.clone();
            context
                .handle_shutdown(shutdown_hook(move |_| async move {
                    log.lock().unwrap().push(label);
                    Ok::<(), BoxError>(())
                }))
                .unwrap();
        }
        assert_eq!(context.pending_hooks(), 3);

        let report = context.shutdown().await.unwrap();
        assert_eq!(report.completed, 3);
        assert_eq!(*log.lock().unwrap(), vec!["client", "cache", "database"]);
    }

    #[tokio::test]
    async fn test_registration_after_shutdown_fails_loudly() {
        let mut context = LambdaInitializationContext::current().unwrap();
        context.shutdown().await.unwrap();

        let result = context.handle_shutdown(shutdown_hook(|_| async { Ok::<(), BoxError>(()) }));
        assert_eq!(result, Err(LifecycleError::AlreadyShutDown));
        assert_eq!(
            context.shutdown().await,
            Err(LifecycleError::AlreadyShutDown)
        );
    }

    #[tokio::test]
    async fn test_hook_receives_scheduler() {
        let mut context = LambdaInitializationContext::current().unwrap();
        context
            .handle_shutdown(shutdown_hook(|scheduler: Handle| async move {
                scheduler
                    .spawn(async { 7 })
                    .await
                    .map_err(|e| Box::new(e) as BoxError)?;
                Ok::<(), BoxError>(())
            }))
            .unwrap();

        let report = context.shutdown().await.unwrap();
        assert!(report.is_clean());
    }
}
