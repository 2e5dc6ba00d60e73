use anyhow::Context;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

use crate::server::protocol::DEFAULT_HTTP_PORT;

/// Server configuration, loaded from an optional YAML file.
///
/// The file path comes from the `BREAKWATER_CONFIG` environment variable,
/// falling back to `breakwater.yaml` in the working directory; a missing
/// file yields defaults. A `PORT` environment variable overrides the
/// configured port.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

fn default_bind_addr() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    DEFAULT_HTTP_PORT
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("BREAKWATER_CONFIG")
            .unwrap_or_else(|_| "breakwater.yaml".to_string());

        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(text) => {
                serde_yaml::from_str(&text).with_context(|| format!("parsing {path}"))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(port) = std::env::var("PORT") {
            cfg.server.port = port.parse().context("PORT must be a port number")?;
        }

        Ok(cfg)
    }
}
