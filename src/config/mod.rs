use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_DIAL_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "broadcaster")]
#[command(about = "Replays each HTTP request to every IPv4 address of a domain and relays the first response")]
#[command(long_about = "Replays each HTTP request to every IPv4 address of a domain and relays the first response.\n\n\
The backend's status code and headers are passed through unchanged, so a backend 404 or 503 \
reaches the caller as-is. The path and query string are both forwarded. A 500 is returned only \
when no backend answered at all.")]
pub struct BroadcasterConfig {
    /// Domain whose A records are the backends
    #[arg(long, env = "DOMAIN")]
    pub domain: Option<String>,

    #[arg(long, env = "LISTEN_SERVER", default_value = "0.0.0.0")]
    pub listen_server: String,

    #[arg(long, env = "LISTEN_PORT", default_value_t = 80)]
    pub listen_port: u16,

    /// Port every resolved backend is reached on
    #[arg(long, env = "TARGET_PORT", default_value_t = 80)]
    pub target_port: u16,

    #[arg(long, env = "DIAL_TIMEOUT_SECS", default_value_t = DEFAULT_DIAL_TIMEOUT_SECS)]
    pub dial_timeout_secs: u64,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[arg(long, env = "VERBOSE", help = "Enable verbose output")]
    pub verbose: bool,
}

impl BroadcasterConfig {
    /// Config for `domain` with every other setting at its default.
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            listen_server: "0.0.0.0".to_string(),
            listen_port: 80,
            target_port: 80,
            dial_timeout_secs: DEFAULT_DIAL_TIMEOUT_SECS,
            log_format: LogFormat::Text,
            verbose: false,
        }
    }

    /// `host:port`, with IPv6 literals bracketed.
    pub fn listen_addr(&self) -> String {
        let host = self.listen_server.trim_start_matches('[').trim_end_matches(']');
        if host.contains(':') {
            format!("[{}]:{}", host, self.listen_port)
        } else {
            format!("{}:{}", host, self.listen_port)
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validation::validate_bind_address("listen_server", &self.listen_server, self.listen_port)
    }
}

impl ConfigProvider for BroadcasterConfig {
    fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or_default()
    }

    fn target_port(&self) -> u16 {
        self.target_port
    }

    fn dial_timeout(&self) -> Duration {
        Duration::from_secs(self.dial_timeout_secs)
    }
}

impl Validate for BroadcasterConfig {
    fn validate(&self) -> Result<()> {
        let domain = validation::validate_required_field("DOMAIN", &self.domain)?;
        validation::validate_domain("domain", domain)?;

        validation::validate_non_empty_string("listen_server", &self.listen_server)?;
        self.bind_addr()?;

        validation::validate_range("target_port", self.target_port, 1, u16::MAX)?;
        validation::validate_range("dial_timeout_secs", self.dial_timeout_secs, 1, 300)?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::BroadcastError;

    #[test]
    fn test_defaults_from_flags() {
        let config =
            BroadcasterConfig::try_parse_from(["broadcaster", "--domain", "nodes.internal"]).unwrap();

        assert_eq!(config.domain.as_deref(), Some("nodes.internal"));
        assert_eq!(config.listen_server, "0.0.0.0");
        assert_eq!(config.listen_port, 80);
        assert_eq!(config.target_port, 80);
        assert_eq!(config.dial_timeout(), Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_domain_fails_validation() {
        let mut config = BroadcasterConfig::for_domain("x");
        config.domain = None;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, BroadcastError::MissingConfigError { ref field } if field == "DOMAIN"));
    }

    #[test]
    fn test_empty_domain_fails_validation() {
        let config = BroadcasterConfig::for_domain("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_listen_addr_joins_host_and_port() {
        let mut config = BroadcasterConfig::for_domain("nodes.internal");
        config.listen_server = "127.0.0.1".to_string();
        config.listen_port = 8080;
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");

        config.listen_server = "::".to_string();
        assert_eq!(config.listen_addr(), "[::]:8080");
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_dial_timeout_out_of_range() {
        let mut config = BroadcasterConfig::for_domain("nodes.internal");
        config.dial_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_long_help_mentions_status_passthrough() {
        use clap::CommandFactory;

        let help = BroadcasterConfig::command().render_long_help().to_string();
        assert!(help.contains("status code and headers are passed through"));
        assert!(help.contains("query string"));
    }

    #[test]
    fn test_json_log_format_flag() {
        let config = BroadcasterConfig::try_parse_from([
            "broadcaster",
            "--domain",
            "nodes.internal",
            "--log-format",
            "json",
            "--target-port",
            "8081",
        ])
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.target_port(), 8081);
    }
}
