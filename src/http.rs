//! HTTP utilities for request/response handling and CORS

use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::TicketError;

/// CORS headers sent on every response, errors included
pub fn get_cors_headers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", "*"),
        ("Access-Control-Allow-Methods", "OPTIONS,POST,GET,PUT,DELETE"),
    ]
}

fn json_response(status: u16, body: String) -> Response<Body> {
    let mut response = Response::builder().status(status);

    for (key, value) in get_cors_headers() {
        response = response.header(key, value);
    }

    response
        .header("Content-Type", "application/json")
        .body(body.into())
        .expect("Couldn't create response")
}

/// Build an error response with consistent formatting
pub fn error_response(
    status: u16,
    error: &str,
    details: &str,
    suggestion: Option<&str>,
) -> Response<Body> {
    let mut body = json!({
        "error": error,
        "details": details,
    });

    if let Some(suggestion) = suggestion {
        body["suggestion"] = json!(suggestion);
    }

    json_response(status, body.to_string())
}

/// Build a successful response with CORS headers
pub fn success_response(status: u16, body: &Value) -> Response<Body> {
    json_response(status, body.to_string())
}

/// Rejects methods the handler doesn't serve
pub fn unsupported_method_response(method: &str) -> Response<Body> {
    let body = json!({
        "message": "Unsupported method",
        "details": format!("Method '{}' is not supported", method),
    });
    json_response(400, body.to_string())
}

/// Handle CORS preflight requests
pub fn handle_options() -> Response<Body> {
    let mut response = Response::builder().status(200);

    for (key, value) in get_cors_headers() {
        response = response.header(key, value);
    }

    response
        .body(Body::Text(String::new()))
        .expect("Couldn't handle CORS request")
}

/// Decode a JSON request body into `T`. An absent body is an error, not `{}`.
pub fn parse_json_body<T>(body: &Body, method: &str) -> Result<T, TicketError>
where
    T: DeserializeOwned,
{
    let body_str = match body {
        Body::Empty => return Err(TicketError::MissingBody(method.to_string())),
        Body::Text(s) => s.as_str(),
        Body::Binary(b) => std::str::from_utf8(b).map_err(|_| TicketError::InvalidUtf8)?,
        _ => return Err(TicketError::MissingBody(method.to_string())),
    };

    Ok(serde_json::from_str(body_str)?)
}
