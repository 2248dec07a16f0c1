//! Startup settings.
//!
//! Read once, before the listener is bound. Sources, lowest precedence first:
//!
//! 1. built-in defaults,
//! 2. an optional `hostecho.{toml,json,yaml}` file in the working directory,
//! 3. `HOSTECHO_*` environment variables (`HOSTECHO_PORT=8080`).

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use ::config::{Environment, File};
use serde::Deserialize;

use crate::error::Error;

const ENV_PREFIX: &str = "HOSTECHO";
const FILE_NAME: &str = "hostecho";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Listen IP. A literal address, not a name.
    pub host: String,
    pub port: u16,
    /// Appended verbatim to the greeting, e.g. `" from v3"`.
    pub greeting_suffix: String,
    /// Registers `/internal_server_error` and `/bad_request`.
    pub diagnostics: bool,
    /// Default log filter when `RUST_LOG` is unset.
    pub log: String,
}

impl Config {
    /// Loads settings from the process environment and the optional file.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(Path::new(FILE_NAME), Environment::with_prefix(ENV_PREFIX))
    }

    /// Same as [`Config::load`], with the file and environment sources
    /// supplied by the caller. `file` may omit its extension; a missing file
    /// is not an error.
    pub fn load_from(file: &Path, env: Environment) -> Result<Self, Error> {
        let settings = ::config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 80)?
            .set_default("greeting_suffix", "")?
            .set_default("diagnostics", false)?
            .set_default("log", "info")?
            .add_source(File::from(file).required(false))
            .add_source(env.try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let ip: IpAddr = self.host.parse().map_err(|source| Error::Addr {
            addr: format!("{}:{}", self.host, self.port),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 80,
            greeting_suffix: String::new(),
            diagnostics: false,
            log: "info".to_owned(),
        }
    }
}
