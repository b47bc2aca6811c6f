use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ApiError;

/// HTTP methods the handlers distinguish between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Other(String),
}

impl Method {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "OPTIONS" => Self::Options,
            other => Self::Other(other.to_string()),
        }
    }
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// Request method for REST (`httpMethod`) and HTTP API (`requestContext.http.method`)
/// events. Defaults to GET.
#[must_use]
pub fn http_method(event: &Value) -> Method {
    v_str(event, &["httpMethod"])
        .or_else(|| v_str(event, &["requestContext", "http", "method"]))
        .map_or(Method::Get, Method::parse)
}

/// Looks up a query parameter in `queryStringParameters`, falling back to
/// `rawQueryString`.
#[must_use]
pub fn query_param(event: &Value, name: &str) -> Option<String> {
    if let Some(v) = v_str(event, &["queryStringParameters", name]) {
        return Some(v.to_string());
    }

    let raw = v_str(event, &["rawQueryString"])?;
    raw.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (decode_component(key) == name).then(|| decode_component(value))
    })
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Required integer `id` query parameter. `missing_message` is returned as a
/// validation error when the parameter is absent or empty.
pub fn id_param(event: &Value, missing_message: &str) -> Result<i32, ApiError> {
    let raw = query_param(event, "id")
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(missing_message.to_string()))?;

    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::Validation(format!("Invalid ID: {raw}")))
}

/// Request body as text, base64-decoded when the event says so. A missing,
/// null or empty body reads as `{}`.
pub fn body_text(event: &Value) -> Result<String, ApiError> {
    let body = match event.get("body").and_then(Value::as_str) {
        Some(b) if !b.trim().is_empty() => b,
        _ => return Ok("{}".to_string()),
    };

    let encoded = event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| ApiError::Parse(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ApiError::Parse(format!("Body is not UTF-8: {e}")))
}

/// Deserializes the request body into `T`.
pub fn json_body<T: DeserializeOwned>(event: &Value) -> Result<T, ApiError> {
    let text = body_text(event)?;
    Ok(serde_json::from_str(&text)?)
}
