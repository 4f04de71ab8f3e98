//! Tray configuration.
//!
//! Defaults, overridden by an optional TOML file, overridden by CLI flags.
//! The file lives at `$XDG_CONFIG_HOME/openlinkhub-tray/tray.toml`
//! (`~/.config/openlinkhub-tray/tray.toml` when unset) and is never written.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use linkhub_protocol::constants::{
    DEFAULT_BACKEND_IP, DEFAULT_BACKEND_PORT, POLL_INTERVAL, REQUEST_TIMEOUT,
};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::StartupError;

/// Tray configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// IP address of the OpenLinkHub service.
    #[serde(default = "default_ip")]
    pub ip: String,

    /// Port of the OpenLinkHub service.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds between backend polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Seconds before a backend poll is abandoned.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_ip() -> String {
    DEFAULT_BACKEND_IP.into()
}

fn default_port() -> u16 {
    DEFAULT_BACKEND_PORT
}

fn default_poll_interval() -> u64 {
    POLL_INTERVAL.as_secs()
}

fn default_request_timeout() -> u64 {
    REQUEST_TIMEOUT.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            port: default_port(),
            poll_interval: default_poll_interval(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Config::default()),
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration file read");
        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ip) = &cli.ip {
            self.ip = ip.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(interval) = cli.poll_interval {
            self.poll_interval = interval;
        }
    }

    /// Validated backend address.
    pub fn backend_addr(&self) -> Result<SocketAddr, StartupError> {
        let ip: IpAddr = self
            .ip
            .parse()
            .map_err(|_| StartupError::InvalidAddress(self.ip.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// URL opened by the "Open Dashboard" row.
    pub fn dashboard_url(&self) -> String {
        match self.backend_addr() {
            Ok(addr) => format!("http://{addr}"),
            Err(_) => format!("http://{}:{}", self.ip, self.port),
        }
    }

    /// Poll interval, at least one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(1))
    }

    /// Per-poll timeout, at least one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.max(1))
    }
}

/// Returns the default configuration file path.
fn config_path() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("openlinkhub-tray").join("tray.toml"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.ip, "127.0.0.1");
        assert_eq!(config.port, 27003);
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn config_partial_toml() {
        // Only specify the port, rest should use defaults.
        let config: Config = toml::from_str("port = 27010").unwrap();
        assert_eq!(config.port, 27010);
        assert_eq!(config.ip, "127.0.0.1");
        assert_eq!(config.poll_interval, 60);
    }

    #[test]
    fn cli_overrides_file() {
        let mut config: Config = toml::from_str("ip = \"10.0.0.2\"\nport = 1000").unwrap();
        let cli = Cli::try_parse_from(["openlinkhub-tray", "--port", "2000", "--poll-interval", "5"])
            .unwrap();
        config.apply_cli(&cli);

        assert_eq!(config.ip, "10.0.0.2");
        assert_eq!(config.port, 2000);
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn backend_addr_validates_ip() {
        let config = Config {
            ip: "localhost".into(),
            ..Config::default()
        };
        let err = config.backend_addr().unwrap_err();
        assert!(matches!(err, StartupError::InvalidAddress(ref ip) if ip == "localhost"));
        assert!(err.to_string().contains("localhost"));
    }

    #[test]
    fn backend_addr_accepts_ipv6() {
        let config = Config {
            ip: "::1".into(),
            ..Config::default()
        };
        assert_eq!(config.backend_addr().unwrap().to_string(), "[::1]:27003");
        assert_eq!(config.dashboard_url(), "http://[::1]:27003");
    }

    #[test]
    fn dashboard_url_default() {
        assert_eq!(Config::default().dashboard_url(), "http://127.0.0.1:27003");
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = Config {
            poll_interval: 0,
            request_timeout: 0,
            ..Config::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn load_from_explicit_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("tray.toml");
        std::fs::write(&path, "ip = \"192.168.0.9\"\npoll_interval = 30\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.ip, "192.168.0.9");
        assert_eq!(config.poll_interval, 30);
        assert_eq!(config.port, 27003);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&tmp.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("tray.toml");
        std::fs::write(&path, "port = \"not a number\"").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_names_the_tray() {
        if let Some(path) = config_path() {
            assert!(path.ends_with("openlinkhub-tray/tray.toml"));
        }
    }
}
