use crate::errors::ResultResp;
use astra::{Body, ResponseBuilder};

pub fn text_response(body: &str) -> ResultResp {
    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Body::from(body.to_string()))
        .unwrap();

    Ok(resp)
}
