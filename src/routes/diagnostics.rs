//! Fixed-status endpoints for exercising error alerting and load-balancer
//! behaviour. Registered only when `diagnostics` is enabled.

use http::StatusCode;
use tracing::error;

use crate::{Request, Response};

pub async fn internal_server_error(_req: Request) -> Response {
    error!("internal server error endpoint hit");
    Response::error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

pub async fn bad_request(_req: Request) -> Response {
    error!("bad request endpoint hit");
    Response::error(StatusCode::BAD_REQUEST, "bad request")
}
