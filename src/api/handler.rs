//! API Lambda handler - thin router in front of the dispatcher.
//!
//! - `GET`: liveness text
//! - `POST`: webhook batch, delegated to [`Dispatcher`]
//! - anything else: 405

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::{helpers, parsing};
use crate::dispatch::Dispatcher;

/// Lambda handler for the webhook entrypoint.
///
/// # Errors
///
/// Never returns an error itself; every failure is mapped to an HTTP response.
#[tracing::instrument(level = "info", skip(dispatcher, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(
    dispatcher: &Dispatcher,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_request(dispatcher, &event.payload).await)
}

/// Routes one API Gateway proxy event and builds its response.
pub async fn handle_request(dispatcher: &Dispatcher, payload: &Value) -> Value {
    let method = parsing::get_http_method(payload).unwrap_or("");
    let user_agent = parsing::get_header_value(payload, "User-Agent").unwrap_or("");
    info!(method = %method, user_agent = %user_agent, "Webhook request received");

    match method {
        "GET" => helpers::ok_text(helpers::LIVENESS_TEXT),
        "POST" => handle_post(dispatcher, payload).await,
        _ => helpers::empty_response(405),
    }
}

async fn handle_post(dispatcher: &Dispatcher, payload: &Value) -> Value {
    let body = match parsing::extract_body(payload) {
        Ok(Some(body)) => body,
        Ok(None) => {
            error!("Request missing body");
            return helpers::dispatch_error();
        }
        Err(e) => {
            error!("Failed to read request body: {}", e);
            return helpers::dispatch_error();
        }
    };

    let response = dispatcher.dispatch_body(&body).await;
    helpers::dispatch_response(&response)
}
