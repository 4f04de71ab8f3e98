//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "openlinkhub-tray",
    version,
    about = "System tray indicator for the OpenLinkHub service"
)]
pub struct Cli {
    /// IP address of the OpenLinkHub service.
    #[arg(long)]
    pub ip: Option<String>,

    /// Port number of the OpenLinkHub service.
    #[arg(long)]
    pub port: Option<u16>,

    /// Seconds between backend polls.
    #[arg(long = "poll-interval", value_name = "SECONDS")]
    pub poll_interval: Option<u64>,

    /// Configuration file (default: $XDG_CONFIG_HOME/openlinkhub-tray/tray.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["openlinkhub-tray"]).unwrap();
        assert!(cli.ip.is_none());
        assert!(cli.port.is_none());
        assert!(cli.poll_interval.is_none());
        assert!(cli.config.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn backend_flags() {
        let cli =
            Cli::try_parse_from(["openlinkhub-tray", "--ip", "192.168.1.20", "--port", "27010"])
                .unwrap();
        assert_eq!(cli.ip.as_deref(), Some("192.168.1.20"));
        assert_eq!(cli.port, Some(27010));
    }

    #[test]
    fn port_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["openlinkhub-tray", "--port", "70000"]).is_err());
    }

    #[test]
    fn subcommands_are_rejected() {
        assert!(Cli::try_parse_from(["openlinkhub-tray", "status"]).is_err());
    }
}
