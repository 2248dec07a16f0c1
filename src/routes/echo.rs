//! `POST /echo`: returns a JSON object body back to the caller.
//!
//! | Body | Response |
//! |---|---|
//! | empty or whitespace only | `200`, empty |
//! | malformed JSON | `400`, decoder message |
//! | JSON object | `200`, `application/json`, the object |
//! | any other JSON value | `200`, empty |
//!
//! Only the first JSON value in the body is read. Whatever follows it is
//! never looked at, so `{"a":1}x` echoes `{"a":1}` and `42abc` is just `42`.
//! Error bodies end in a newline (see [`Response::error`]).

use http::StatusCode;
use serde::Deserialize;
use serde_json::{Deserializer, Value};
use tracing::debug;

use crate::{Request, Response};

pub async fn echo(req: Request) -> Response {
    echo_body(req.body())
}

fn echo_body(body: &[u8]) -> Response {
    if body.iter().all(|b| is_json_whitespace(*b)) {
        return Response::empty();
    }

    // No `Deserializer::end`: trailing bytes are not an error.
    let value = match Value::deserialize(&mut Deserializer::from_slice(body)) {
        Ok(value) => value,
        Err(e) => {
            debug!("echo: malformed body: {e}");
            return Response::error(StatusCode::BAD_REQUEST, e);
        }
    };

    match value {
        Value::Object(_) => match serde_json::to_vec(&value) {
            Ok(bytes) => Response::json(bytes),
            Err(e) => Response::error(StatusCode::BAD_REQUEST, e),
        },
        Value::Array(_) | Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {
            Response::empty()
        }
    }
}

/// The four bytes RFC 8259 allows between tokens.
fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
