//! Layer 3: HTTP API Coding Handler
//!
//! [`LambdaCoding`] for HTTP API proxy integrations. Decodes the request body
//! as JSON, wraps outputs in `200` responses and maps every failure onto a
//! well-formed response.
//!
//! # Status mapping
//!
//! | Failure | Status |
//! |---|---|
//! | `HandlerError::EmptyBody` | 400 |
//! | any other `HandlerError` | 500 |
//! | any other error | 500 |
//!
//! Classification looks at the top-level error only. A new status is added
//! here, never inferred from an error's type elsewhere.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lambda_core::json::describe_json_error;
use lambda_core::{
    ApiGatewayV2Request, ApiGatewayV2Response, BoxError, HandlerError, LambdaCoding, StatusCode,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Body sent when an error-body projection itself fails
pub const FALLBACK_ERROR_BODY: &str = "Internal Server Error";

/// Projection computing a response body from a handler output
pub type ResponseBody<O> =
    Arc<dyn Fn(&O) -> Result<Option<String>, BoxError> + Send + Sync + 'static>;

/// Projection computing a response body from an error
pub type ErrorBody = Arc<
    dyn Fn(&(dyn Error + Send + Sync + 'static)) -> Result<Option<String>, BoxError>
        + Send
        + Sync
        + 'static,
>;

/// Coder for HTTP API proxy events carrying JSON bodies
///
/// `E` is the application event parsed from the request body, `O` the
/// handler output.
pub struct ApiGatewayCoder<E, O> {
    response_body: ResponseBody<O>,
    error_body: ErrorBody,
    _event: PhantomData<fn() -> E>,
}

impl<E, O> ApiGatewayCoder<E, O>
where
    O: 'static,
{
    /// Create a coder with the default projections
    ///
    /// Outputs produce no body; errors produce their description.
    pub fn new() -> Self {
        Self {
            response_body: Arc::new(|_: &O| Ok::<Option<String>, BoxError>(None)),
            error_body: Arc::new(default_error_body),
            _event: PhantomData,
        }
    }

    /// Replace the projection computing a body from an output
    pub fn with_response_body<F>(mut self, response_body: F) -> Self
    where
        F: Fn(&O) -> Result<Option<String>, BoxError> + Send + Sync + 'static,
    {
        self.response_body = Arc::new(response_body);
        self
    }

    /// Replace the projection computing a body from an error
    pub fn with_error_body<F>(mut self, error_body: F) -> Self
    where
        F: Fn(&(dyn Error + Send + Sync + 'static)) -> Result<Option<String>, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.error_body = Arc::new(error_body);
        self
    }

    /// Serialize outputs as the JSON response body
    pub fn with_json_response_body(self) -> Self
    where
        O: Serialize,
    {
        self.with_response_body(|output: &O| Ok(Some(serde_json::to_string(output)?)))
    }
}

/// Status code answering the given error
pub fn status_for(error: &(dyn Error + Send + Sync + 'static)) -> StatusCode {
    match HandlerError::classify(error) {
        Some(HandlerError::EmptyBody) => StatusCode::BAD_REQUEST,
        Some(HandlerError::EnvironmentMissing { .. }) | Some(HandlerError::Custom { .. }) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Default error-body projection
///
/// The error's description; JSON failures are described with line and column.
/// A custom error without a message has no body.
pub fn default_error_body(
    error: &(dyn Error + Send + Sync + 'static),
) -> Result<Option<String>, BoxError> {
    if let Some(known) = HandlerError::classify(error) {
        return Ok(match known {
            HandlerError::Custom { message: None } => None,
            other => Some(other.to_string()),
        });
    }
    if let Some(json) = error.downcast_ref::<serde_json::Error>() {
        return Ok(Some(describe_json_error(json)));
    }
    Ok(Some(error.to_string()))
}

/// Response sent when an error-body projection fails
pub fn fallback_response() -> ApiGatewayV2Response {
    ApiGatewayV2Response::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(FALLBACK_ERROR_BODY.to_string()),
    )
}

impl<E, O> LambdaCoding for ApiGatewayCoder<E, O>
where
    E: DeserializeOwned + Send + 'static,
    O: Send + 'static,
{
    type WireEvent = ApiGatewayV2Request;
    type WireOutput = ApiGatewayV2Response;
    type Event = E;
    type Output = O;

    fn decode(&self, event: &ApiGatewayV2Request) -> Result<E, BoxError> {
        let body = event.body.as_deref().ok_or(HandlerError::EmptyBody)?;
        if event.is_base64_encoded {
            let bytes = BASE64.decode(body)?;
            return Ok(serde_json::from_slice(&bytes)?);
        }
        Ok(serde_json::from_str(body)?)
    }

    fn encode_output(&self, output: &O) -> Result<ApiGatewayV2Response, BoxError> {
        let body = (self.response_body)(output)?;
        Ok(ApiGatewayV2Response::new(StatusCode::OK, body))
    }

    fn encode_error(&self, error: &(dyn Error + Send + Sync + 'static)) -> ApiGatewayV2Response {
        let status = status_for(error);
        // The projection is user code and may panic.
        match panic::catch_unwind(AssertUnwindSafe(|| (self.error_body)(error))) {
            Ok(Ok(body)) => ApiGatewayV2Response::new(status, body),
            Ok(Err(projection_error)) => {
                tracing::error!(
                    error = %error,
                    projection_error = %projection_error,
                    "error body projection failed"
                );
                fallback_response()
            }
            Err(_) => {
                tracing::error!(error = %error, "error body projection panicked");
                fallback_response()
            }
        }
    }
}

impl<E, O> Default for ApiGatewayCoder<E, O>
where
    O: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, O> Clone for ApiGatewayCoder<E, O> {
    fn clone(&self) -> Self {
        Self {
            response_body: Arc::clone(&self.response_body),
            error_body: Arc::clone(&self.error_body),
            _event: PhantomData,
        }
    }
}

impl<E, O> fmt::Debug for ApiGatewayCoder<E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiGatewayCoder").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Ping {
        count: u32,
    }

    fn request(body: Option<&str>, is_base64_encoded: bool) -> ApiGatewayV2Request {
        serde_json::from_value(serde_json::json!({
            "version": "2.0",
            "routeKey": "$default",
            "rawPath": "/",
            "requestContext": {
                "accountId": "123456789012",
                "apiId": "api-id",
                "domainName": "id.execute-api.us-east-1.amazonaws.com",
                "domainPrefix": "id",
                "http": {
                    "method": "POST",
                    "path": "/",
                    "protocol": "HTTP/1.1",
                    "sourceIp": "192.168.0.1/32",
                    "userAgent": "agent"
                },
                "requestId": "id",
                "routeKey": "$default",
                "stage": "$default",
                "time": "12/Mar/2020:19:03:58 +0000",
                "timeEpoch": 1583348638390_i64
            },
            "body": body,
            "isBase64Encoded": is_base64_encoded
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_base64_body() {
        let coder = ApiGatewayCoder::<Ping, ()>::new();
        let encoded = BASE64.encode(r#"{"count":3}"#);
        let event = coder.decode(&request(Some(encoded.as_str()), true)).unwrap();
        assert_eq!(event, Ping { count: 3 });
    }

    #[test]
    fn test_invalid_base64_is_internal_error() {
        let coder = ApiGatewayCoder::<Ping, ()>::new();
        let error = coder.decode(&request(Some("not base64!"), true)).unwrap_err();
        assert!(HandlerError::classify(error.as_ref()).is_none());
        assert_eq!(
            coder.encode_error(error.as_ref()).status_code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_json_error_body_is_described() {
        let coder = ApiGatewayCoder::<Ping, ()>::new();
        let error = coder.decode(&request(Some("{}"), false)).unwrap_err();
        let response = coder.encode_error(error.as_ref());
        assert_eq!(response.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.body.unwrap();
        assert!(body.starts_with("The body does not match the expected shape"));
        assert!(body.contains("missing field `count`"));
    }

    #[test]
    fn test_custom_without_message_has_no_body() {
        let coder = ApiGatewayCoder::<Ping, ()>::new();
        let response = coder.encode_error(&HandlerError::custom_empty());
        assert_eq!(response.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.body.is_none());
    }

    #[test]
    fn test_failing_error_projection_falls_back() {
        let coder = ApiGatewayCoder::<Ping, ()>::new()
            .with_error_body(|_| Err("projection exploded".into()));
        let response = coder.encode_error(&HandlerError::EmptyBody);
        assert_eq!(response, fallback_response());
    }

    #[test]
    fn test_panicking_error_projection_falls_back() {
        let coder = ApiGatewayCoder::<Ping, ()>::new()
            .with_error_body(|_| panic!("projection exploded"));
        let response = coder.encode_error(&HandlerError::custom("ignored"));
        assert_eq!(response, fallback_response());
    }

    #[test]
    fn test_failing_response_projection_is_reported() {
        let coder =
            ApiGatewayCoder::<Ping, u8>::new().with_response_body(|_| Err("cannot render".into()));
        let error = coder.encode_output(&1).unwrap_err();
        assert_eq!(error.to_string(), "cannot render");
    }

    #[test]
    fn test_json_response_body() {
        let coder = ApiGatewayCoder::<Ping, Vec<u8>>::new().with_json_response_body();
        let response = coder.encode_output(&vec![1, 2]).unwrap();
        assert_eq!(response.status_code, StatusCode::OK);
        assert_eq!(response.body.as_deref(), Some("[1,2]"));
    }
}
