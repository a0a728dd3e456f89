//! Invocation driver
//!
//! Walks one wire event through decode, handle and encode. Every failure is
//! caught here exactly once and turned into a wire output; nothing escapes to
//! the caller, panics included.

use futures::FutureExt;
use lambda_core::effects::{WireEventOf, WireOutputOf};
use lambda_core::{
    BoxError, EventHandler, HandlerProvider, HandlerResult, InvocationState, LambdaCoding,
    RuntimeContext,
};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::Instrument;

/// A panic raised while decoding, handling or encoding
///
/// Answered like any other opaque failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("The invocation panicked: {message}")]
pub struct InvocationPanic {
    /// Panic payload, when it was a string
    pub message: String,
}

impl InvocationPanic {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => payload
                .downcast_ref::<&'static str>()
                .map_or_else(|| "unknown panic payload".to_string(), |m| (*m).to_string()),
        };
        Self { message }
    }
}

/// Wire output of an invocation together with the states it visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord<W> {
    /// Response produced for the platform
    pub output: W,
    /// Visited states, starting at `Received` and ending at `Responded`
    pub states: Vec<InvocationState>,
}

impl<W> InvocationRecord<W> {
    /// Whether the failure branch was taken
    pub fn failed(&self) -> bool {
        self.states.contains(&InvocationState::Erroring)
    }
}

struct Trail {
    states: Vec<InvocationState>,
}

impl Trail {
    fn new() -> Self {
        Self {
            states: vec![InvocationState::Received],
        }
    }

    fn current(&self) -> InvocationState {
        self.states
            .last()
            .copied()
            .unwrap_or(InvocationState::Received)
    }

    fn enter(&mut self, next: InvocationState) {
        let from = self.current();
        debug_assert!(from.can_transition_to(next), "{from} -> {next}");
        tracing::debug!(%from, to = %next, "invocation transition");
        self.states.push(next);
    }
}

/// Run one invocation and return the wire output
pub async fn invoke<P>(provider: &P, context: &P::Context, event: WireEventOf<P>) -> WireOutputOf<P>
where
    P: HandlerProvider,
{
    invoke_recorded(provider, context, event).await.output
}

/// Run one invocation and return the wire output with the visited states
///
/// The handler is built from the context on every call; construction
/// failures are reported like handler failures.
pub async fn invoke_recorded<P>(
    provider: &P,
    context: &P::Context,
    event: WireEventOf<P>,
) -> InvocationRecord<WireOutputOf<P>>
where
    P: HandlerProvider,
{
    let span = context.span().clone();
    async move {
        let mut trail = Trail::new();
        tracing::info!(request_id = context.request_id(), "invocation received");

        let outcome = AssertUnwindSafe(run(provider, context, &event, &mut trail))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                let panic = InvocationPanic::from_payload(payload);
                tracing::error!(message = %panic.message, "invocation panicked");
                Err(Box::new(panic) as BoxError)
            });

        let output = match outcome {
            Ok(output) => output,
            Err(error) => {
                tracing::warn!(state = %trail.current(), error = %error, "invocation failed");
                trail.enter(InvocationState::Erroring);
                trail.enter(InvocationState::ErrorEncoding);
                provider.coder().encode_error(error.as_ref())
            }
        };
        trail.enter(InvocationState::Responded);

        tracing::info!(
            request_id = context.request_id(),
            transitions = trail.states.len() - 1,
            "invocation responded"
        );
        InvocationRecord {
            output,
            states: trail.states,
        }
    }
    .instrument(span)
    .await
}

async fn run<P>(
    provider: &P,
    context: &P::Context,
    event: &WireEventOf<P>,
    trail: &mut Trail,
) -> HandlerResult<WireOutputOf<P>>
where
    P: HandlerProvider,
{
    let coder = provider.coder();

    trail.enter(InvocationState::Decoding);
    let decoded = coder.decode(event)?;
    trail.enter(InvocationState::Decoded);

    trail.enter(InvocationState::Invoking);
    let handler = provider.make_handler(context)?;
    let output = handler.handle(decoded).await?;
    trail.enter(InvocationState::Invoked);

    trail.enter(InvocationState::Encoding);
    coder.encode_output(&output)
}
