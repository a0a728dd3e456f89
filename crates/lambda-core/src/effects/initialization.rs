//! Process-scoped initialization context and shutdown hooks
//!
//! One initialization context exists per process. Handler construction code
//! registers teardown work through [`InitializationContext::handle_shutdown`];
//! teardown drains the hooks exactly once, last registered first.

use crate::errors::{BoxError, LifecycleError};
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use tokio::runtime::Handle;
use tracing::Span;

/// Future returned by a shutdown hook
pub type ShutdownFuture = BoxFuture<'static, Result<(), BoxError>>;

/// Teardown callback, invoked once with the scheduler handle
pub type ShutdownHook = Box<dyn FnOnce(Handle) -> ShutdownFuture + Send + Sync + 'static>;

/// Box an async closure as a [`ShutdownHook`]
pub fn shutdown_hook<F, Fut>(hook: F) -> ShutdownHook
where
    F: FnOnce(Handle) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    Box::new(move |scheduler| Box::pin(hook(scheduler)))
}

/// Information about the process initialization
pub trait InitializationContext: Send + Sync {
    /// Span to log with
    fn span(&self) -> &Span;

    /// Scheduler used to spawn cooperating work
    fn scheduler(&self) -> &Handle;

    /// Register a hook to run on shutdown
    ///
    /// Registration takes `&mut self`: the hook list has a single owner and
    /// concurrent registration is not supported. Fails with
    /// [`LifecycleError::AlreadyShutDown`] once teardown has run.
    fn handle_shutdown(&mut self, hook: ShutdownHook) -> Result<(), LifecycleError>;
}

/// Outcome of draining a [`ShutdownHooks`] stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Hooks that completed successfully
    pub completed: usize,
    /// Descriptions of hooks that failed, in the order they ran
    pub failures: Vec<String>,
}

impl ShutdownReport {
    /// Whether every hook succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered stack of shutdown hooks
///
/// Push on register, pop on teardown. A failing hook is logged and recorded;
/// the remaining hooks still run.
#[derive(Default)]
pub struct ShutdownHooks {
    hooks: Vec<ShutdownHook>,
    drained: bool,
}

impl ShutdownHooks {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a hook onto the stack
    pub fn register(&mut self, hook: ShutdownHook) -> Result<(), LifecycleError> {
        if self.drained {
            return Err(LifecycleError::AlreadyShutDown);
        }
        self.hooks.push(hook);
        Ok(())
    }

    /// Number of hooks waiting to run
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are waiting
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Whether teardown has already run
    pub fn is_drained(&self) -> bool {
        self.drained
    }

    /// Run every hook in reverse registration order, one at a time
    pub async fn drain(&mut self, scheduler: &Handle) -> Result<ShutdownReport, LifecycleError> {
        if self.drained {
            return Err(LifecycleError::AlreadyShutDown);
        }
        self.drained = true;

        let mut report = ShutdownReport::default();
        while let Some(hook) = self.hooks.pop() {
            match hook(scheduler.clone()).await {
                Ok(()) => report.completed += 1,
                Err(error) => {
                    tracing::warn!(error = %error, "shutdown hook failed");
                    report.failures.push(error.to_string());
                }
            }
        }
        tracing::debug!(
            completed = report.completed,
            failed = report.failures.len(),
            "shutdown hooks drained"
        );
        Ok(report)
    }
}

impl fmt::Debug for ShutdownHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownHooks")
            .field("pending", &self.hooks.len())
            .field("drained", &self.drained)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_hook(label: &'static str, log: Arc<Mutex<Vec<&'static str>>>) -> ShutdownHook {
        shutdown_hook(move |_scheduler| async move {
            log.lock().unwrap().push(label);
            Ok::<(), BoxError>(())
        })
    }

    #[tokio::test]
    async fn test_hooks_run_in_reverse_order_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = ShutdownHooks::new();
        hooks.register(recording_hook("A", log.clone())).unwrap();
        hooks.register(recording_hook("B", log.clone())).unwrap();
        hooks.register(recording_hook("C", log.clone())).unwrap();
        assert_eq!(hooks.len(), 3);

        let report = hooks.drain(&Handle::current()).await.unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["C", "B", "A"]);
        assert_eq!(report.completed, 3);
        assert!(report.is_clean());
        assert!(hooks.is_empty());

        assert_eq!(
            hooks.drain(&Handle::current()).await,
            Err(LifecycleError::AlreadyShutDown)
        );
        assert_eq!(log.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failing_hook_does_not_stop_teardown() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = ShutdownHooks::new();
        hooks.register(recording_hook("first", log.clone())).unwrap();
        hooks
            .register(shutdown_hook(|_| async { Err::<(), BoxError>("disk gone".into()) }))
            .unwrap();

        let report = hooks.drain(&Handle::current()).await.unwrap();

        assert_eq!(report.completed, 1);
        assert_eq!(report.failures, vec!["disk gone".to_string()]);
        assert_eq!(*log.lock().unwrap(), vec!["first"]);
    }

    #[tokio::test]
    async fn test_register_after_drain_fails() {
        let mut hooks = ShutdownHooks::new();
        hooks.drain(&Handle::current()).await.unwrap();

        let result = hooks.register(shutdown_hook(|_| async { Ok::<(), BoxError>(()) }));
        assert_eq!(result, Err(LifecycleError::AlreadyShutDown));
        assert!(hooks.is_drained());
        assert!(hooks.is_empty());
    }
}
