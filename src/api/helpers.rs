//! Response builders for API Gateway proxy responses.

use serde_json::{Value, json};

use crate::core::models::DispatchResponse;

/// Liveness text returned for `GET`.
pub const LIVENESS_TEXT: &str = "LINE Bot is running!";

/// Returns a 200 OK response with a plain-text body.
#[must_use]
pub fn ok_text(text: &str) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "text/plain; charset=utf-8" },
        "body": text
    })
}

/// Returns a JSON response with the given status code.
#[must_use]
pub fn json_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns a status-only response with an empty body.
#[must_use]
pub fn empty_response(status_code: u16) -> Value {
    json!({ "statusCode": status_code, "body": "" })
}

/// Maps a batch acknowledgement to its HTTP response: 200 on success,
/// 500 with `{"status":"error"}` otherwise.
#[must_use]
pub fn dispatch_response(response: &DispatchResponse) -> Value {
    let status_code = match response {
        DispatchResponse::Success { .. } => 200,
        DispatchResponse::Error => 500,
    };
    let body = serde_json::to_value(response).unwrap_or_else(|_| json!({ "status": "error" }));
    json_response(status_code, &body)
}

/// Returns the canonical batch-level failure response.
#[must_use]
pub fn dispatch_error() -> Value {
    dispatch_response(&DispatchResponse::Error)
}
