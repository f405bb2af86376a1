use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};

/// Convert a ServerError into a plain-text response
pub fn error_to_response(err: ServerError) -> Response {
    match &err {
        ServerError::NotFound => text_error_response(404, &err.to_string()),
        ServerError::MethodNotAllowed => text_error_response(405, &err.to_string()),
        ServerError::Config(_) => text_error_response(500, &err.to_string()),
        ServerError::Fetch(_) => text_error_response(500, &err.to_string()),
    }
}

pub fn text_error_response(status: u16, message: &str) -> Response {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Body::from(message.to_string()))
        .unwrap()
}
