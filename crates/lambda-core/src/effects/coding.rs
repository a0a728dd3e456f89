//! Coding adapter between wire envelopes and application types

use crate::errors::HandlerResult;
use std::error::Error;

/// Decode/encode/error-encode triple bridging wire and application types
pub trait LambdaCoding: Send + Sync {
    /// The platform event envelope
    type WireEvent: Send + Sync;

    /// The platform response envelope
    type WireOutput: Send;

    /// The application event produced by [`decode`](Self::decode)
    type Event: Send + 'static;

    /// The application output consumed by [`encode_output`](Self::encode_output)
    type Output: Send + 'static;

    /// Decode an application event from a wire event
    fn decode(&self, event: &Self::WireEvent) -> HandlerResult<Self::Event>;

    /// Encode an application output as a wire output
    ///
    /// Fails only when a user-supplied body projection fails.
    fn encode_output(&self, output: &Self::Output) -> HandlerResult<Self::WireOutput>;

    /// Encode any error as a wire output
    ///
    /// Total: every error, known or opaque, maps to a well-formed response.
    fn encode_error(&self, error: &(dyn Error + Send + Sync + 'static)) -> Self::WireOutput;
}
