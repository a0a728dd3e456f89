//! Handler composition and the invocation state machine
//!
//! A [`HandlerProvider`] ties a coder to a handler factory. The driver in
//! `lambda-effects` walks an invocation through [`InvocationState`]s.

use super::coding::LambdaCoding;
use super::handler::EventHandler;
use super::supertraits::FunctionContext;
use crate::errors::HandlerResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composition of a coder with the handler it feeds
pub trait HandlerProvider: Send + Sync {
    /// Context handed to the handler factory
    type Context: FunctionContext;

    /// The application handler
    type Handler: EventHandler;

    /// The coder translating between wire and handler types
    type Coder: LambdaCoding<
        Event = <Self::Handler as EventHandler>::Event,
        Output = <Self::Handler as EventHandler>::Output,
    >;

    /// The coder used for every invocation
    fn coder(&self) -> &Self::Coder;

    /// Build the handler responsible for the function's core logic
    fn make_handler(&self, context: &Self::Context) -> HandlerResult<Self::Handler>;
}

/// Wire event type of a provider
pub type WireEventOf<P> = <<P as HandlerProvider>::Coder as LambdaCoding>::WireEvent;

/// Wire output type of a provider
pub type WireOutputOf<P> = <<P as HandlerProvider>::Coder as LambdaCoding>::WireOutput;

/// Stage of a single invocation
///
/// ```text
/// Received → Decoding → Decoded → Invoking → Invoked → Encoding → Responded
///               │                    │                    │
///               └────────────────────┴────────────────────┴→ Erroring → ErrorEncoding → Responded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvocationState {
    /// The wire event has arrived
    Received,
    /// The coder is decoding the wire event
    Decoding,
    /// The application event is ready
    Decoded,
    /// The handler is running
    Invoking,
    /// The handler produced an output
    Invoked,
    /// The coder is encoding the output
    Encoding,
    /// A failure was caught
    Erroring,
    /// The coder is encoding the failure
    ErrorEncoding,
    /// A wire output was produced
    Responded,
}

impl InvocationState {
    /// Whether `next` may follow `self`
    pub fn can_transition_to(self, next: InvocationState) -> bool {
        use InvocationState::*;
        matches!(
            (self, next),
            (Received, Decoding)
                | (Decoding, Decoded)
                | (Decoding, Erroring)
                | (Decoded, Invoking)
                | (Invoking, Invoked)
                | (Invoking, Erroring)
                | (Invoked, Encoding)
                | (Encoding, Responded)
                | (Encoding, Erroring)
                | (Erroring, ErrorEncoding)
                | (ErrorEncoding, Responded)
        )
    }

    /// Whether this is the terminal state
    pub fn is_terminal(self) -> bool {
        self == InvocationState::Responded
    }
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvocationState::Received => "received",
            InvocationState::Decoding => "decoding",
            InvocationState::Decoded => "decoded",
            InvocationState::Invoking => "invoking",
            InvocationState::Invoked => "invoked",
            InvocationState::Encoding => "encoding",
            InvocationState::Erroring => "erroring",
            InvocationState::ErrorEncoding => "error_encoding",
            InvocationState::Responded => "responded",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::InvocationState::*;
    use super::*;

    const ALL: [InvocationState; 9] = [
        Received,
        Decoding,
        Decoded,
        Invoking,
        Invoked,
        Encoding,
        Erroring,
        ErrorEncoding,
        Responded,
    ];

    #[test]
    fn test_success_path_is_legal() {
        let path = [
            Received, Decoding, Decoded, Invoking, Invoked, Encoding, Responded,
        ];
        assert!(path.windows(2).all(|w| w[0].can_transition_to(w[1])));
    }

    #[test]
    fn test_failure_paths_reach_responded() {
        for from in [Decoding, Invoking, Encoding] {
            assert!(from.can_transition_to(Erroring), "{from} should fail over");
        }
        assert!(Erroring.can_transition_to(ErrorEncoding));
        assert!(ErrorEncoding.can_transition_to(Responded));
    }

    #[test]
    fn test_responded_is_the_only_terminal() {
        for state in ALL {
            let has_exit = ALL.iter().any(|next| state.can_transition_to(*next));
            assert_eq!(state.is_terminal(), !has_exit, "{state}");
        }
    }

    #[test]
    fn test_no_shortcut_to_responded() {
        for state in [Received, Decoding, Decoded, Invoking, Invoked, Erroring] {
            assert!(!state.can_transition_to(Responded), "{state}");
        }
    }
}
