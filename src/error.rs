//! Unified error type.

use thiserror::Error;

/// The error type returned by hostecho's fallible operations.
///
/// Per-request failures (malformed JSON, hostname lookup) are expressed as
/// HTTP [`Response`](crate::Response) values, not as `Error`s. This type
/// surfaces startup and listener failures only.
#[derive(Debug, Error)]
pub enum Error {
    /// Binding the listener or accepting on it failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be loaded or deserialized.
    #[error("config: {0}")]
    Config(#[from] ::config::ConfigError),

    /// The configured host and port do not form a socket address.
    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
