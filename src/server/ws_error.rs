/// Centralized helpers for WebSocket and HTTP error responses.
///
/// Every error carries a stable code next to its human-readable message, so clients
/// can branch on the kind without parsing text.
use actix_web::{http::StatusCode, HttpResponse};
use serde_json::{json, Value};

use crate::error::BlitError;

/// Formats a WebSocket error message as a JSON string, in the same
/// `{"action":..,"data":..}` envelope as every other server message.
pub fn ws_error_message(code: &str, message: &str) -> String {
    json!({
        "action": "Error",
        "data": { "code": code, "message": message }
    })
    .to_string()
}

/// JSON body describing `err`.
pub fn error_body(err: &BlitError) -> Value {
    json!({
        "error": { "code": err.code(), "message": err.to_string() }
    })
}

/// Returns an HTTP error response with a JSON body.
pub fn http_error_response(err: &BlitError, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(error_body(err))
}
