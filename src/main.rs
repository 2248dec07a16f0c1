//! hostecho binary.
//!
//! ```text
//! HOSTECHO_PORT=8080 HOSTECHO_DIAGNOSTICS=true hostecho
//! curl localhost:8080/
//! curl -X POST localhost:8080/echo -d '{"a":1}'
//! ```

use std::process::ExitCode;

use hostecho::{Config, Server, routes};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Logging needs the configured level, so a config error is reported
    // through a default subscriber.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing("info");
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), hostecho::Error> {
    let addr = config.socket_addr()?;
    Server::bind(addr).serve(routes::app(&config)).await
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
