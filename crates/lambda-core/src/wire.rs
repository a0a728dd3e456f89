//! HTTP API proxy envelopes (payload format 2.0)
//!
//! These mirror the platform's request and response documents. Only `body`,
//! `isBase64Encoded` and `statusCode` carry meaning here; everything else is
//! passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP status code of a wire response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(u16);

impl StatusCode {
    /// 200 OK
    pub const OK: StatusCode = StatusCode(200);
    /// 400 Bad Request
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);

    /// Create a status code from its numeric value
    pub const fn from_u16(code: u16) -> Self {
        Self(code)
    }

    /// The numeric value
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Standard reason phrase, when known
    pub fn reason_phrase(self) -> Option<&'static str> {
        match self.0 {
            200 => Some("OK"),
            201 => Some("Created"),
            204 => Some("No Content"),
            400 => Some("Bad Request"),
            401 => Some("Unauthorized"),
            403 => Some("Forbidden"),
            404 => Some("Not Found"),
            500 => Some("Internal Server Error"),
            502 => Some("Bad Gateway"),
            503 => Some("Service Unavailable"),
            _ => None,
        }
    }

    /// Whether this is a 2xx status
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason_phrase() {
            Some(reason) => write!(f, "{} {}", self.0, reason),
            None => write!(f, "{}", self.0),
        }
    }
}

/// HTTP description inside the request context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpDescription {
    /// Request method
    pub method: String,
    /// Request path
    pub path: String,
    /// Protocol, e.g. `HTTP/1.1`
    pub protocol: String,
    /// Caller address
    pub source_ip: String,
    /// Caller user agent
    pub user_agent: String,
}

/// Request context supplied by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Owning account
    pub account_id: String,
    /// Gateway identifier
    pub api_id: String,
    /// Domain the request arrived on
    pub domain_name: String,
    /// First label of the domain
    pub domain_prefix: String,
    /// HTTP description
    pub http: HttpDescription,
    /// Gateway request identifier
    pub request_id: String,
    /// Route that matched
    pub route_key: String,
    /// Deployment stage
    pub stage: String,
    /// Human-readable request time
    pub time: String,
    /// Request time in milliseconds since the epoch
    pub time_epoch: i64,
    /// Authorizer output, passed through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorizer: Option<Value>,
    /// Client certificate data, passed through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Value>,
}

/// Wire event delivered for an HTTP API request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayV2Request {
    /// Payload format version
    pub version: String,
    /// Route that matched
    pub route_key: String,
    /// Raw request path
    pub raw_path: String,
    /// Raw query string, without the leading `?`
    #[serde(default)]
    pub raw_query_string: String,
    /// Request cookies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<String>>,
    /// Request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Parsed query parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
    /// Path parameters extracted by the route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<BTreeMap<String, String>>,
    /// Request context
    pub request_context: RequestContext,
    /// Request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Whether `body` is base64 encoded
    #[serde(default)]
    pub is_base64_encoded: bool,
    /// Stage variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_variables: Option<BTreeMap<String, String>>,
}

/// Wire output answering an HTTP API request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayV2Response {
    /// Response status
    pub status_code: StatusCode,
    /// Response headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Whether `body` is base64 encoded
    #[serde(default)]
    pub is_base64_encoded: bool,
    /// Cookies to set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<String>>,
}

impl ApiGatewayV2Response {
    /// A response with the given status and body and nothing else
    pub fn new(status_code: StatusCode, body: Option<String>) -> Self {
        Self {
            status_code,
            headers: None,
            body,
            is_base64_encoded: false,
            cookies: None,
        }
    }
}
