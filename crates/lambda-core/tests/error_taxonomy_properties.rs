//! Property tests for the error taxonomy and wire envelopes
//!
//! - Every `HandlerError` survives boxing and classification unchanged
//! - Errors of other types are never classified
//! - Response envelopes keep their status and body through JSON

use lambda_core::{ApiGatewayV2Response, BoxError, HandlerError, StatusCode};
use proptest::prelude::*;

fn arb_handler_error() -> impl Strategy<Value = HandlerError> {
    prop_oneof![
        Just(HandlerError::EmptyBody),
        "[A-Z_]{1,24}".prop_map(HandlerError::environment_missing),
        proptest::option::of(".{0,40}").prop_map(|message| HandlerError::Custom { message }),
    ]
}

proptest! {
    #[test]
    fn classification_recovers_boxed_errors(error in arb_handler_error()) {
        let boxed: BoxError = Box::new(error.clone());
        prop_assert_eq!(HandlerError::classify(boxed.as_ref()), Some(&error));
    }

    #[test]
    fn foreign_errors_stay_opaque(message in ".{0,40}") {
        let boxed: BoxError = message.into();
        prop_assert!(HandlerError::classify(boxed.as_ref()).is_none());
    }

    #[test]
    fn missing_variable_description_names_key(name in "[A-Z_]{1,24}") {
        let description = HandlerError::environment_missing(name.clone()).to_string();
        let expected = format!("`{name}`");
        prop_assert!(description.contains(&expected));
    }

    #[test]
    fn response_json_keeps_status_and_body(
        code in 100u16..600,
        body in proptest::option::of(".{0,64}"),
    ) {
        let response = ApiGatewayV2Response::new(StatusCode::from_u16(code), body);
        let json = serde_json::to_string(&response).unwrap();
        let parsed: ApiGatewayV2Response = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, response);
    }
}

#[test]
fn custom_without_message_has_fallback_description() {
    let error = HandlerError::Custom { message: None };
    assert_eq!(error.to_string(), "An unspecified error occurred.");
}
