//! Response builders shared by both handlers.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::errors::ApiError;

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// HTTP-shaped response returned to the Lambda runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ApiResponse {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn json_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ])
}

/// Answers a CORS preflight request.
#[must_use]
pub fn preflight() -> ApiResponse {
    ApiResponse {
        status_code: 200,
        headers: BTreeMap::from([
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Methods".to_string(),
                ALLOWED_METHODS.to_string(),
            ),
            (
                "Access-Control-Allow-Headers".to_string(),
                "Content-Type".to_string(),
            ),
        ]),
        body: String::new(),
        is_base64_encoded: false,
    }
}

/// Serializes `payload` as the JSON body of a response with `status_code`.
pub fn json_response<T: Serialize + ?Sized>(
    status_code: u16,
    payload: &T,
) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse {
        status_code,
        headers: json_headers(),
        body: serde_json::to_string(payload)?,
        is_base64_encoded: false,
    })
}

/// `{"message": ...}` with status 200.
#[must_use]
pub fn ok_message(message: &str) -> ApiResponse {
    ApiResponse {
        status_code: 200,
        headers: json_headers(),
        body: json!({ "message": message }).to_string(),
        is_base64_encoded: false,
    }
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> ApiResponse {
    ApiResponse {
        status_code,
        headers: json_headers(),
        body: json!({ "error": message }).to_string(),
        is_base64_encoded: false,
    }
}

/// Maps an [`ApiError`] onto its status code, logging internal failures.
#[must_use]
pub fn error_response(err: &ApiError) -> ApiResponse {
    if err.is_internal() {
        error!("Request failed: {}", err);
    }
    err_response(err.status_code(), &err.to_string())
}
