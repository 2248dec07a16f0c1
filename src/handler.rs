//! Route handlers.
//!
//! Every route in this server answers with a finished [`Response`]; none of
//! them stream or return anything else. That keeps the handler contract to a
//! single shape:
//!
//! ```text
//! Fn(Request) -> impl Future<Output = Response> + Send
//! ```
//!
//! Plain `async fn`s satisfy it (`echo::echo`), and so do closures that
//! carry startup settings into each request (the greeting captures its
//! suffix and hostname source). The router keeps them all as
//! `Arc<dyn Handler>`, one allocation per route, shared by every connection.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

/// The boxed future a handler returns for one request.
///
/// Boxing erases each handler's concrete future type so that different
/// handlers fit in the same routing table. `Send` lets hyper drive it from
/// any runtime worker.
pub type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A handler as stored in the routing table.
///
/// Cloning it per request costs one atomic increment.
pub(crate) type SharedHandler = Arc<dyn Handler>;

/// Something that turns a [`Request`] into a [`Response`].
///
/// Implemented for every `Fn(Request) -> Fut` where `Fut` resolves to a
/// [`Response`]; there is no need to implement it by hand.
pub trait Handler: Send + Sync + 'static {
    /// Starts handling `req`.
    fn call(&self, req: Request) -> ResponseFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, req: Request) -> ResponseFuture {
        Box::pin((self)(req))
    }
}

/// Moves a handler into the form the router stores.
pub(crate) fn share(handler: impl Handler) -> SharedHandler {
    Arc::new(handler)
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    async fn teapot(_req: Request) -> Response {
        Response::status(StatusCode::IM_A_TEAPOT)
    }

    #[tokio::test]
    async fn async_fn_is_a_handler() {
        let handler = share(teapot);
        let res = handler.call(Request::from_parts("/", "")).await;
        assert_eq!(res.status_code(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn closure_keeps_its_captures_across_requests() {
        let greeting: Arc<str> = Arc::from("hi");
        let handler = share(move |req: Request| {
            let greeting = Arc::clone(&greeting);
            async move { Response::text(format!("{greeting} {}", req.path())) }
        });

        for path in ["/a", "/b"] {
            let res = handler.call(Request::from_parts(path, "")).await;
            assert_eq!(res.body(), format!("hi {path}").as_bytes());
        }
    }
}
