//! Outgoing HTTP response type.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

/// An outgoing HTTP response.
///
/// ```rust
/// use hostecho::Response;
/// use http::StatusCode;
///
/// Response::json(br#"{"a":1}"#.to_vec());
/// Response::text("hello");
/// Response::empty();
/// Response::error(StatusCode::BAD_REQUEST, "nope");
/// ```
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// `200 OK`, `application/json`.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::builder().json(body)
    }

    /// `200 OK`, `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// `200 OK` with no body and no content type.
    pub fn empty() -> Self {
        Self::status(StatusCode::OK)
    }

    /// Response with no body.
    pub fn status(status: StatusCode) -> Self {
        Self { status, headers: HeaderMap::new(), body: Bytes::new() }
    }

    /// Plain-text error reply: the message plus a trailing newline, marked
    /// `x-content-type-options: nosniff` so browsers never render it as
    /// anything but text.
    pub fn error(status: StatusCode, message: impl std::fmt::Display) -> Self {
        Self::builder()
            .status(status)
            .header(X_CONTENT_TYPE_OPTIONS.as_str(), "nosniff")
            .text(format!("{message}\n"))
    }

    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { status: StatusCode::OK, headers: HeaderMap::new() }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Converts into the hyper response written to the wire.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        res
    }
}

/// Fluent builder for [`Response`]. Defaults to `200 OK`.
///
/// Header names and values that are not valid HTTP are dropped rather than
/// failing the response.
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HeaderMap,
}

impl ResponseBuilder {
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) =
            (HeaderName::try_from(name), HeaderValue::try_from(value))
        {
            self.headers.append(name, value);
        }
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: impl Into<Bytes>) -> Response {
        self.finish(JSON, body.into())
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish(TEXT, Bytes::from(body.into()))
    }

    pub fn no_body(self) -> Response {
        Response { status: self.status, headers: self.headers, body: Bytes::new() }
    }

    fn finish(mut self, content_type: &'static str, body: Bytes) -> Response {
        self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        Response { status: self.status, headers: self.headers, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_sets_content_type() {
        let res = Response::json(br#"{"a":1}"#.to_vec());
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.content_type(), Some("application/json"));
        assert_eq!(res.body(), br#"{"a":1}"#);
    }

    #[test]
    fn empty_has_no_content_type() {
        let res = Response::empty();
        assert_eq!(res.status_code(), StatusCode::OK);
        assert!(res.content_type().is_none());
        assert!(res.body().is_empty());
    }

    #[test]
    fn error_is_newline_terminated_text_with_nosniff() {
        let res = Response::error(StatusCode::BAD_REQUEST, "oops");
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(res.content_type(), Some("text/plain; charset=utf-8"));
        assert_eq!(res.headers().get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(res.body(), b"oops\n");
    }

    #[test]
    fn builder_keeps_extra_headers_and_drops_invalid_ones() {
        let res = Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header("allow", "POST")
            .header("bad header", "x")
            .no_body();
        assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers().get("allow").unwrap(), "POST");
        assert_eq!(res.headers().len(), 1);
    }

    #[test]
    fn into_inner_carries_everything() {
        let inner = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/x")
            .text("made")
            .into_inner();
        assert_eq!(inner.status(), StatusCode::CREATED);
        assert_eq!(inner.headers().get("location").unwrap(), "/x");
    }
}
