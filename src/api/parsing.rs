use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde_json::Value;

use crate::errors::BotError;

/// HTTP method of an API Gateway proxy event (payload v2, then v1).
pub fn get_http_method(payload: &Value) -> Option<&str> {
    ["/requestContext/http/method", "/httpMethod"]
        .iter()
        .find_map(|pointer| payload.pointer(pointer).and_then(Value::as_str))
}

/// Extracts the request body, decoding it when API Gateway marked it as base64.
///
/// Returns `Ok(None)` when the event carries no body.
pub fn extract_body(payload: &Value) -> Result<Option<String>, BotError> {
    let Some(body) = payload.get("body") else {
        return Ok(None);
    };
    if body.is_null() {
        return Ok(None);
    }

    let Some(body_str) = body.as_str() else {
        return Err(BotError::ParseError("Request body is not a string".to_string()));
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !is_base64 {
        return Ok(Some(body_str.to_string()));
    }

    let bytes = BASE64_STANDARD
        .decode(body_str)
        .map_err(|e| BotError::ParseError(format!("Failed to decode base64 body: {e}")))?;
    let decoded = String::from_utf8(bytes)
        .map_err(|e| BotError::ParseError(format!("Body is not valid UTF-8: {e}")))?;

    Ok(Some(decoded))
}

/// Header lookup ignoring case; API Gateway v2 lower-cases names, v1 does not.
pub fn get_header_value<'a>(payload: &'a Value, name: &str) -> Option<&'a str> {
    payload
        .get("headers")?
        .as_object()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, value)| value.as_str())
}
