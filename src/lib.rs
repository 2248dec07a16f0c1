//! # hostecho
//!
//! A tiny HTTP demo server for exercising deployments and load balancers:
//!
//! | Path | Behaviour |
//! |---|---|
//! | `/` | `Hello World from {hostname}` |
//! | `POST /echo` | returns a JSON object body, drops anything else |
//! | `/internal_server_error`, `/bad_request` | fixed 500 / 400, opt-in |
//!
//! Built on hyper and tokio with a small radix-tree router. Handlers are plain
//! async functions (or closures) from [`Request`] to [`Response`].
//!
//! ```rust,no_run
//! use hostecho::{Config, Server, routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hostecho::Error> {
//!     let config = Config::load()?;
//!     Server::bind(config.socket_addr()?)
//!         .serve(routes::app(&config))
//!         .await
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod config;
pub mod routes;

#[cfg(test)]
mod testing;

pub use self::config::Config;
pub use error::Error;
pub use handler::{Handler, ResponseFuture};
pub use request::Request;
pub use response::{Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
