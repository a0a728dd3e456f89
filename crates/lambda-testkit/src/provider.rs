//! Context provider for handler tests
//!
//! Owns a scoped scheduler: acquired by [`ContextProvider::set_up`], released
//! by [`ContextProvider::shut_down`]. Contexts need a live scheduler handle
//! even without a platform, so every factory fails until setup has run.
//!
//! # Usage
//!
//! ```rust
//! use lambda_core::{EnvironmentValueProvider, HandlerError};
//! use lambda_testkit::{environment_from, ContextProvider, MockContextConfig};
//!
//! let mut provider = ContextProvider::<&'static str>::new(environment_from([("TABLE", "t")]));
//! provider.set_up().unwrap();
//!
//! let context = provider.make_context(MockContextConfig::default()).unwrap();
//! assert_eq!(context.value(&"TABLE").unwrap(), "t");
//! assert_eq!(
//!     context.value(&"MISSING"),
//!     Err(HandlerError::environment_missing("MISSING"))
//! );
//!
//! provider.shut_down().unwrap();
//! ```

use crate::context::{MockContext, MockContextConfig};
use crate::initialization::MockInitializationContext;
use lambda_core::{EnvironmentResolver, EnvironmentVariable};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::{Builder, Handle, Runtime};

/// Time granted to in-flight tasks when the scheduler is released
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Context provider lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// A factory or teardown was called before setup
    #[error("The context provider has not been set up")]
    NotSetUp,

    /// Setup was called twice without teardown
    #[error("The context provider is already set up")]
    AlreadySetUp,

    /// The scheduler could not be created
    #[error("Failed to create the test scheduler: {message}")]
    Runtime {
        /// Underlying failure
        message: String,
    },
}

/// Test-scoped owner of a scheduler and factory for mock contexts
pub struct ContextProvider<E>
where
    E: EnvironmentVariable + 'static,
{
    runtime: Option<Runtime>,
    resolver: EnvironmentResolver<E>,
}

impl<E> ContextProvider<E>
where
    E: EnvironmentVariable + 'static,
{
    /// Create a provider whose contexts resolve through `resolver`
    pub fn new(resolver: EnvironmentResolver<E>) -> Self {
        Self {
            runtime: None,
            resolver,
        }
    }

    /// Acquire the scheduler: a multi-threaded runtime with one worker
    pub fn set_up(&mut self) -> Result<(), ProviderError> {
        if self.runtime.is_some() {
            return Err(ProviderError::AlreadySetUp);
        }
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("lambda-testkit")
            .enable_time()
            .build()
            .map_err(|e| ProviderError::Runtime {
                message: e.to_string(),
            })?;
        tracing::debug!("context provider set up");
        self.runtime = Some(runtime);
        Ok(())
    }

    /// Release the scheduler
    ///
    /// Must be paired with exactly one [`set_up`](Self::set_up). Outside async
    /// code in-flight tasks get a grace period; inside async code (where a
    /// runtime may not block) the scheduler is released in the background.
    pub fn shut_down(&mut self) -> Result<(), ProviderError> {
        let runtime = self.runtime.take().ok_or(ProviderError::NotSetUp)?;
        if Handle::try_current().is_ok() {
            runtime.shutdown_background();
        } else {
            runtime.shutdown_timeout(SHUTDOWN_GRACE);
        }
        tracing::debug!("context provider shut down");
        Ok(())
    }

    /// Whether the scheduler is live
    pub fn is_set_up(&self) -> bool {
        self.runtime.is_some()
    }

    /// Handle to the live scheduler
    pub fn scheduler(&self) -> Result<Handle, ProviderError> {
        self.runtime
            .as_ref()
            .map(|runtime| runtime.handle().clone())
            .ok_or(ProviderError::NotSetUp)
    }

    /// Drive a future to completion on the scheduler
    ///
    /// Do not call from inside an async context.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output, ProviderError> {
        let runtime = self.runtime.as_ref().ok_or(ProviderError::NotSetUp)?;
        Ok(runtime.block_on(future))
    }

    /// The resolver handed to every context
    pub fn resolver(&self) -> &EnvironmentResolver<E> {
        &self.resolver
    }

    /// Replace the resolver for contexts made from now on
    pub fn set_resolver(&mut self, resolver: EnvironmentResolver<E>) {
        self.resolver = resolver;
    }

    /// A fresh mock initialization context
    pub fn make_initialization_context(
        &self,
    ) -> Result<MockInitializationContext<E>, ProviderError> {
        Ok(MockInitializationContext::new(
            self.scheduler()?,
            self.resolver.clone(),
        ))
    }

    /// A fresh mock runtime context
    pub fn make_context(&self, config: MockContextConfig) -> Result<MockContext<E>, ProviderError> {
        Ok(MockContext::new(
            config,
            self.scheduler()?,
            self.resolver.clone(),
        ))
    }
}

impl<E> Drop for ContextProvider<E>
where
    E: EnvironmentVariable + 'static,
{
    fn drop(&mut self) {
        // A runtime may not be dropped from within async code.
        if let Some(runtime) = self.runtime.take() {
            tracing::warn!("context provider dropped without shut_down");
            runtime.shutdown_background();
        }
    }
}

impl<E> fmt::Debug for ContextProvider<E>
where
    E: EnvironmentVariable + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextProvider")
            .field("set_up", &self.is_set_up())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{empty_environment, environment_from};
    use lambda_core::{EnvironmentValueProvider, HandlerError};

    fn provider() -> ContextProvider<&'static str> {
        ContextProvider::new(empty_environment())
    }

    #[test]
    fn test_factories_require_setup() {
        let provider = provider();
        assert_eq!(
            provider.make_context(MockContextConfig::default()).unwrap_err(),
            ProviderError::NotSetUp
        );
        assert_eq!(
            provider.make_initialization_context().unwrap_err(),
            ProviderError::NotSetUp
        );
        assert_eq!(provider.block_on(async {}), Err(ProviderError::NotSetUp));
    }

    #[test]
    fn test_setup_teardown_pairing() {
        let mut provider = provider();
        provider.set_up().unwrap();
        assert_eq!(provider.set_up(), Err(ProviderError::AlreadySetUp));

        provider.shut_down().unwrap();
        assert!(!provider.is_set_up());
        assert_eq!(provider.shut_down(), Err(ProviderError::NotSetUp));
    }

    #[tokio::test]
    async fn test_shut_down_inside_async_code() {
        let mut provider = provider();
        provider.set_up().unwrap();
        let context = provider.make_context(MockContextConfig::default()).unwrap();
        assert!(!context.request_id.is_empty());

        provider.shut_down().unwrap();
        assert!(!provider.is_set_up());
    }

    #[test]
    fn test_set_resolver_applies_to_later_contexts() {
        let mut provider = provider();
        provider.set_up().unwrap();
        let before = provider.make_context(MockContextConfig::default()).unwrap();

        provider.set_resolver(environment_from([("TABLE", "greetings")]));
        let after = provider.make_context(MockContextConfig::default()).unwrap();

        assert_eq!(
            before.value(&"TABLE"),
            Err(HandlerError::environment_missing("TABLE"))
        );
        assert_eq!(after.value(&"TABLE").as_deref(), Ok("greetings"));
        assert_eq!(provider.resolver()(&"TABLE").as_deref(), Ok("greetings"));
        provider.shut_down().unwrap();
    }

    #[test]
    fn test_block_on_runs_on_scheduler() {
        let mut provider = provider();
        provider.set_up().unwrap();
        let scheduler = provider.scheduler().unwrap();

        let value = provider
            .block_on(async move { scheduler.spawn(async { 40 + 2 }).await.unwrap() })
            .unwrap();
        assert_eq!(value, 42);
        provider.shut_down().unwrap();
    }
}
