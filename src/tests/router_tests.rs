use crate::config::Config;
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::{handle, parse_suburbs};
use astra::Body;
use http::{Method, Request};
use std::io::Read;

fn test_config() -> Config {
    Config {
        domain_api_key: "key".to_string(),
        bigquery_project_id: "project".to_string(),
        dataset: "domain".to_string(),
        table: "listings_test".to_string(),
        state: "NSW".to_string(),
        bigquery_access_token: "token".to_string(),
    }
}

fn request(method: Method, uri: &str) -> astra::Request {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn body_string(resp: astra::Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

#[test]
fn unknown_path_is_not_found() {
    let err = handle(request(Method::GET, "/nope"), &test_config())
        .expect_err("unknown path should not resolve");
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn wrong_method_on_fetch_is_rejected() {
    let err = handle(request(Method::DELETE, "/fetch"), &test_config())
        .expect_err("DELETE should not reach the fetch cycle");
    assert!(matches!(err, ServerError::MethodNotAllowed));
}

#[test]
fn parse_suburbs_keeps_order_and_decodes() {
    let req = request(
        Method::GET,
        "/fetch?suburb=Pyrmont&other=1&suburb=Surry%20Hills&suburb=Glebe",
    );
    let suburbs = parse_suburbs(&req);

    let names: Vec<&str> = suburbs.iter().map(|s| s.suburb.as_str()).collect();
    assert_eq!(names, vec!["Pyrmont", "Surry Hills", "Glebe"]);
    assert!(suburbs.iter().all(|s| s.postcode.is_none()));
}

#[test]
fn parse_suburbs_with_no_query_is_empty() {
    let req = request(Method::GET, "/fetch");
    assert!(parse_suburbs(&req).is_empty());
}

#[test]
fn fetch_error_becomes_a_500_with_detail() {
    let resp = error_to_response(ServerError::Fetch("upstream broke".to_string()));
    assert_eq!(resp.status(), 500);
    assert_eq!(body_string(resp), "/fetch failed: upstream broke");
}

#[test]
fn not_found_becomes_a_404() {
    let resp = error_to_response(ServerError::NotFound);
    assert_eq!(resp.status(), 404);
    assert_eq!(body_string(resp), "Not Found");
}
