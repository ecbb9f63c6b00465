use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{catch, Request};

use crate::internal_error::ErrorBody;

/// Failures that never reach a handler (guards, bad JSON, unknown routes)
/// get the same `{"error": ...}` body as handler errors.
#[catch(default)]
pub fn default_catcher(status: Status, request: &Request<'_>) -> Json<ErrorBody> {
    let message = match status.code {
        401 => "Please log in.".to_string(),
        404 => format!("No route for {}", request.uri()),
        422 | 400 => "Malformed request body.".to_string(),
        _ => status.reason_lossy().to_string(),
    };

    Json(ErrorBody::new(message))
}
