//! The application's routing table.

pub mod diagnostics;
pub mod echo;
pub mod greeting;

use crate::config::Config;
use crate::router::Router;

use self::greeting::{HostnameLookup, system_hostname};

/// Builds the router for `config`, looking hostnames up from the OS.
pub fn app(config: &Config) -> Router {
    app_with_hostname(config, system_hostname)
}

/// Builds the router for `config` with a custom hostname source.
///
/// The greeting owns `/` and every path nothing else claims, so load
/// balancer health checks on arbitrary paths get a `200`.
pub fn app_with_hostname(config: &Config, lookup: HostnameLookup) -> Router {
    let greet = greeting::greeting(config.greeting_suffix.clone(), lookup);

    let router = Router::new()
        .any("/", greet.clone())
        .any("/{*rest}", greet)
        .post("/echo", echo::echo);

    if config.diagnostics {
        router
            .any("/internal_server_error", diagnostics::internal_server_error)
            .any("/bad_request", diagnostics::bad_request)
    } else {
        router
    }
}
