use astra::Response;
use std::fmt;

/// Errors surfaced by the HTTP layer: routing misses, startup
/// configuration problems, and failed fetch cycles.
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    MethodNotAllowed,
    Config(String),
    Fetch(String),
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            ServerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ServerError::Fetch(msg) => write!(f, "/fetch failed: {msg}"),
        }
    }
}

impl std::error::Error for ServerError {}
