//! Incoming HTTP request type.

use bytes::Bytes;

/// An incoming HTTP request, reduced to what the handlers read: the path and
/// the fully-buffered body.
pub struct Request {
    path: String,
    body: Bytes,
}

impl Request {
    /// Builds a request outside the server, for exercising handlers directly.
    pub fn from_parts(path: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self { path: path.into(), body: body.into() }
    }

    pub fn path(&self) -> &str { &self.path }
    pub fn body(&self) -> &[u8] { &self.body }
}
