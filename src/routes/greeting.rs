//! `/` and every path no other route claims: greets the caller with this
//! machine's hostname.

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use http::StatusCode;
use tracing::info;

use crate::{Handler, Request, Response};

/// Source of the machine name. Swappable so the failure path can be exercised.
pub type HostnameLookup = fn() -> io::Result<OsString>;

pub fn system_hostname() -> io::Result<OsString> {
    hostname::get()
}

/// Builds the greeting handler. `suffix` is appended verbatim after the
/// hostname.
///
/// The handler is `Clone` so the same greeting can serve both `/` and the
/// catch-all route.
pub fn greeting(suffix: String, lookup: HostnameLookup) -> impl Handler + Clone {
    let suffix: Arc<str> = Arc::from(suffix);
    move |req: Request| {
        let suffix = Arc::clone(&suffix);
        async move { greet(req.path(), &suffix, lookup) }
    }
}

fn greet(path: &str, suffix: &str, lookup: HostnameLookup) -> Response {
    info!(path, "hello world request");
    match lookup() {
        Ok(host) => Response::text(format!("Hello World from {}{suffix}", host.to_string_lossy())),
        Err(e) => Response::error(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::LogCapture;

    fn fixed_host() -> io::Result<OsString> {
        Ok(OsString::from("box-1"))
    }

    fn broken_host() -> io::Result<OsString> {
        Err(io::Error::other("uname failed"))
    }

    #[test]
    fn greets_with_hostname() {
        let res = greet("/", "", fixed_host);
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"Hello World from box-1");
    }

    #[test]
    fn appends_suffix() {
        let res = greet("/", " from v3", fixed_host);
        assert_eq!(res.body(), b"Hello World from box-1 from v3");
    }

    #[test]
    fn lookup_failure_is_a_server_error() {
        let res = greet("/", "", broken_host);
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body(), b"uname failed\n");
        assert_eq!(res.headers().get("x-content-type-options").unwrap(), "nosniff");
    }

    #[test]
    fn uses_the_real_hostname() {
        let host = system_hostname().unwrap();
        let res = greet("/", "", system_hostname);
        let body = std::str::from_utf8(res.body()).unwrap();
        assert_eq!(body, format!("Hello World from {}", host.to_string_lossy()));
    }

    #[test]
    fn logs_one_info_line_per_request() {
        let (logs, _guard) = LogCapture::start();

        greet("/", "", fixed_host);
        greet("/healthz", "", broken_host);

        let lines: Vec<_> = logs
            .lines()
            .into_iter()
            .filter(|l| l.contains("hello world request"))
            .collect();
        assert_eq!(lines.len(), 2, "{lines:?}");
        assert!(lines.iter().all(|l| l.contains("INFO")), "{lines:?}");
        assert!(lines[1].contains("/healthz"), "{lines:?}");
    }

    #[tokio::test]
    async fn handler_serves_any_path() {
        let handler = greeting(String::new(), fixed_host);
        let res = handler.call(Request::from_parts("/some/deep/path", "")).await;
        assert_eq!(res.body(), b"Hello World from box-1");
    }
}
