//! Wire envelope fixtures
//!
//! [`RequestBuilder`] produces HTTP API proxy events shaped like the sample
//! payload in the platform documentation; [`mock_response`] produces the
//! response a coder is expected to return.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lambda_core::wire::{HttpDescription, RequestContext};
use lambda_core::{ApiGatewayV2Request, ApiGatewayV2Response, StatusCode};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Builder for mock HTTP API proxy events
///
/// Defaults: `POST /endpoint`, no cookies, no headers, no parameters, no body.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: String,
    raw_path: String,
    cookies: Option<Vec<String>>,
    headers: BTreeMap<String, String>,
    query_parameters: Option<BTreeMap<String, String>>,
    path_parameters: Option<BTreeMap<String, String>>,
    is_base64_encoded: bool,
    body: Option<String>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            method: "POST".to_string(),
            raw_path: "/endpoint".to_string(),
            cookies: None,
            headers: BTreeMap::new(),
            query_parameters: None,
            path_parameters: None,
            is_base64_encoded: false,
            body: None,
        }
    }
}

impl RequestBuilder {
    /// Start from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the raw path
    pub fn raw_path(mut self, raw_path: impl Into<String>) -> Self {
        self.raw_path = raw_path.into();
        self
    }

    /// Add a cookie
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookies.get_or_insert_with(Vec::new).push(cookie.into());
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn query_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Add a path parameter
    pub fn path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Base64 encode the body when building
    pub fn base64_encoded(mut self, is_base64_encoded: bool) -> Self {
        self.is_base64_encoded = is_base64_encoded;
        self
    }

    /// Set the raw body
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the body to the JSON serialization of `value`
    pub fn json_body<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        Ok(self.body(serde_json::to_string(value)?))
    }

    /// Build the event
    pub fn build(self) -> ApiGatewayV2Request {
        // Query values are inserted verbatim, without percent-encoding.
        let raw_query_string = self
            .query_parameters
            .iter()
            .flatten()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        let body = match self.body {
            Some(body) if self.is_base64_encoded => Some(BASE64.encode(body)),
            other => other,
        };

        ApiGatewayV2Request {
            version: "2.0".to_string(),
            route_key: "$default".to_string(),
            raw_path: self.raw_path,
            raw_query_string,
            cookies: self.cookies,
            headers: self.headers,
            query_string_parameters: self.query_parameters,
            path_parameters: self.path_parameters,
            request_context: sample_request_context(self.method),
            body,
            is_base64_encoded: self.is_base64_encoded,
            stage_variables: Some(BTreeMap::from([
                ("stageVariable1".to_string(), "value1".to_string()),
                ("stageVariable2".to_string(), "value2".to_string()),
            ])),
        }
    }
}

fn sample_request_context(method: String) -> RequestContext {
    RequestContext {
        account_id: "123456789012".to_string(),
        api_id: "api-id".to_string(),
        domain_name: "id.execute-api.us-east-1.amazonaws.com".to_string(),
        domain_prefix: "id".to_string(),
        http: HttpDescription {
            method,
            path: "/path/to/resource".to_string(),
            protocol: "HTTP/1.1".to_string(),
            source_ip: "192.168.0.1/32".to_string(),
            user_agent: "agent".to_string(),
        },
        request_id: "id".to_string(),
        route_key: "$default".to_string(),
        stage: "$default".to_string(),
        time: "12/Mar/2020:19:03:58 +0000".to_string(),
        time_epoch: 1_583_348_638_390,
        authorizer: Some(json!({
            "jwt": {
                "claims": {"claim1": "value1", "claim2": "value2"},
                "scopes": ["scope1", "scope2"]
            }
        })),
        authentication: Some(json!({
            "clientCert": {
                "clientCertPem": "CERT_CONTENT",
                "subjectDN": "www.example.com",
                "issuerDN": "Example issuer",
                "serialNumber": "a1:a1:a1:a1:a1:a1:a1:a1:a1:a1:a1:a1:a1:a1:a1:a1",
                "validity": {
                    "notBefore": "May 28 12:30:02 2019 GMT",
                    "notAfter": "Aug  5 09:36:04 2021 GMT"
                }
            }
        })),
    }
}

/// Event with the JSON serialization of `value` as its body
pub fn mock_request<T: Serialize + ?Sized>(
    value: &T,
) -> Result<ApiGatewayV2Request, serde_json::Error> {
    Ok(RequestBuilder::new().json_body(value)?.build())
}

/// Response with the given status and the JSON serialization of `value` as its body
pub fn mock_response<T: Serialize + ?Sized>(
    value: &T,
    status: StatusCode,
) -> Result<ApiGatewayV2Response, serde_json::Error> {
    Ok(ApiGatewayV2Response::new(
        status,
        Some(serde_json::to_string(value)?),
    ))
}
