//! Application handler capability

use crate::errors::HandlerResult;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

/// Application logic computing an output from an event
///
/// Produces exactly one output or exactly one failure per call. Failures are
/// never seen by the platform: the coding layer turns them into a response.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// The handler's input
    type Event: Send + 'static;

    /// The handler's output
    type Output: Send + 'static;

    /// Handle the given event and return its output
    async fn handle(&self, event: Self::Event) -> HandlerResult<Self::Output>;
}

/// [`EventHandler`] backed by an async closure
pub struct HandlerFn<F, E, O> {
    f: F,
    _types: PhantomData<fn(E) -> O>,
}

/// Build an [`EventHandler`] from an async closure
///
/// ```rust
/// use lambda_core::effects::{handler_fn, EventHandler};
///
/// # block_on(async {
/// let double = handler_fn(|value: u32| async move { Ok::<_, lambda_core::BoxError>(value * 2) });
/// assert_eq!(double.handle(21).await.unwrap(), 42);
/// # });
/// # fn block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     futures::executor::block_on(f)
/// # }
/// ```
pub fn handler_fn<F, Fut, E, O>(f: F) -> HandlerFn<F, E, O>
where
    F: Fn(E) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult<O>> + Send + 'static,
{
    HandlerFn {
        f,
        _types: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, E, O> EventHandler for HandlerFn<F, E, O>
where
    F: Fn(E) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult<O>> + Send + 'static,
    E: Send + 'static,
    O: Send + 'static,
{
    type Event = E;
    type Output = O;

    async fn handle(&self, event: E) -> HandlerResult<O> {
        (self.f)(event).await
    }
}

impl<F, E, O> fmt::Debug for HandlerFn<F, E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{BoxError, HandlerError};

    #[tokio::test]
    async fn test_handler_fn_success() {
        let handler = handler_fn(|name: String| async move {
            Ok::<_, BoxError>(format!("hello {name}"))
        });
        assert_eq!(handler.handle("ada".to_string()).await.unwrap(), "hello ada");
    }

    #[tokio::test]
    async fn test_handler_fn_failure() {
        let handler = handler_fn(|_: ()| async move {
            Err::<(), BoxError>(Box::new(HandlerError::custom("nope")))
        });
        let error = handler.handle(()).await.unwrap_err();
        assert_eq!(
            HandlerError::classify(error.as_ref()),
            Some(&HandlerError::custom("nope"))
        );
    }
}
