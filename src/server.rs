//! HTTP server and graceful shutdown.
//!
//! # Lifecycle
//!
//! 1. [`Server::serve`] accepts connections until SIGTERM (what ECS and
//!    Kubernetes send when a task is replaced) or Ctrl-C.
//! 2. Each connection runs on its own tokio task; hyper speaks HTTP/1.1 or
//!    HTTP/2 on it, whichever the client opens with.
//! 3. On the signal, accepting stops and every open connection is told to
//!    finish: requests already in progress complete, idle keep-alive
//!    connections close at once.
//! 4. `serve` returns when the last connection is gone.
//!
//! No timeouts are imposed on any of these steps.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::{TcpListener, TcpStream};
use tracing::{Instrument, debug, error, info, info_span};

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::router::{Lookup, Router};

/// Where the server gets its listener from.
enum Bind {
    /// Bound when serving starts; a bind failure is returned from `serve`.
    Addr(SocketAddr),
    /// Already bound by the caller, e.g. on `127.0.0.1:0` in tests.
    Listener(TcpListener),
}

/// The HTTP server.
pub struct Server {
    bind: Bind,
}

impl Server {
    /// Binds to `addr` when [`serve`](Server::serve) is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { bind: Bind::Addr(addr) }
    }

    /// Serves on a listener the caller already bound.
    pub fn from_listener(listener: TcpListener) -> Self {
        Self { bind: Bind::Listener(listener) }
    }

    /// Serves until SIGTERM or Ctrl-C, then drains open connections.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Serves until `shutdown` resolves, then drains open connections.
    pub async fn serve_with_shutdown(
        self,
        router: Router,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let listener = match self.bind {
            Bind::Addr(addr) => TcpListener::bind(addr).await?,
            Bind::Listener(listener) => listener,
        };
        let local_addr = listener.local_addr()?;

        // Read-only for the rest of the process; every connection holds a
        // clone of the Arc.
        let router = Arc::new(router);
        let conn_builder = ConnBuilder::new(TokioExecutor::new());
        let graceful = GracefulShutdown::new();

        info!(addr = %local_addr, "hostecho listening");

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Checked first so a pending signal is noticed even while
                // connections keep arriving.
                biased;

                () = &mut shutdown => break,

                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        serve_connection(&conn_builder, &graceful, stream, peer, Arc::clone(&router));
                    }
                    // Per-connection failures (e.g. the peer reset before
                    // accept) must not stop the server.
                    Err(e) => error!("accept error: {e}"),
                },
            }
        }

        // Dropping the listener refuses new connections while the old ones
        // drain.
        drop(listener);
        info!("shutdown signal received, draining connections");
        graceful.shutdown().await;

        info!("hostecho stopped");
        Ok(())
    }
}

/// Spawns the task that owns one TCP connection.
///
/// The connection is registered with `graceful` so shutdown can reach it.
fn serve_connection(
    conn_builder: &ConnBuilder<TokioExecutor>,
    graceful: &GracefulShutdown,
    stream: TcpStream,
    peer: SocketAddr,
    router: Arc<Router>,
) {
    // hyper calls this once per request on the connection.
    let svc = service_fn(move |req| {
        let router = Arc::clone(&router);
        async move { dispatch(&router, req).await }
    });

    let conn = conn_builder.serve_connection_with_upgrades(TokioIo::new(stream), svc);
    let conn = graceful.watch(conn.into_owned());

    tokio::spawn(async move {
        if let Err(e) = conn.await {
            debug!(%peer, "connection error: {e}");
        }
    });
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// Runs inside a `request` span carrying method and path, so handler log
/// lines are attributed to the request that caused them. Every failure is
/// turned into a status code; hyper never sees an error.
async fn dispatch(
    router: &Router,
    req: hyper::Request<Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_owned();
    let span = info_span!("request", method = %parts.method, path = %path);

    let response = async move {
        let response = match router.lookup(&parts.method, &path) {
            // The body is only read once a handler wants it.
            Lookup::Found(handler) => match body.collect().await {
                Ok(collected) => {
                    handler.call(Request::from_parts(path, collected.to_bytes())).await
                }
                Err(e) => {
                    debug!("body read error: {e}");
                    Response::status(StatusCode::BAD_REQUEST)
                }
            },
            Lookup::MethodNotAllowed(methods) => {
                let allow = methods
                    .iter()
                    .map(http::Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                Response::builder()
                    .status(StatusCode::METHOD_NOT_ALLOWED)
                    .header("allow", &allow)
                    .no_body()
            }
            Lookup::NotFound => Response::status(StatusCode::NOT_FOUND),
        };

        debug!(
            status = response.status_code().as_u16(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "request completed"
        );
        response
    }
    .instrument(span)
    .await;

    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first of SIGTERM or Ctrl-C.
///
/// A signal source that cannot be installed is logged and then ignored; the
/// other one still works.
async fn shutdown_signal() {
    tokio::select! {
        () = interrupted() => info!("received Ctrl-C"),
        () = terminated() => info!("received SIGTERM"),
    }
}

async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {}
        Err(e) => {
            error!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(unix)]
async fn terminated() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            error!("cannot listen for SIGTERM: {e}");
            std::future::pending::<()>().await;
        }
    }
}

/// No SIGTERM outside Unix; only Ctrl-C stops the server there.
#[cfg(not(unix))]
async fn terminated() {
    std::future::pending::<()>().await;
}
