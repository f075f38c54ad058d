use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::net::Ipv4Addr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BroadcastError {
    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to resolve IP addresses for domain {domain}: {source}")]
    ResolveError {
        domain: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create request for IP {addr}: {reason}")]
    RequestBuildError { addr: Ipv4Addr, reason: String },

    #[error("Failed to forward request to IP {addr}: {source}")]
    ForwardError {
        addr: Ipv4Addr,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read {what} body: {reason}")]
    BodyReadError { what: &'static str, reason: String },

    #[error("No successful responses received")]
    NoSuccessfulResponse,

    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BroadcastError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BroadcastError::MissingConfigError { .. }
                | BroadcastError::InvalidConfigValueError { .. }
        )
    }

    /// Short message meant for whoever started the process.
    pub fn user_friendly_message(&self) -> String {
        match self {
            BroadcastError::MissingConfigError { field } => {
                format!("{} environment variable not set", field)
            }
            BroadcastError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            BroadcastError::IoError(e) => format!("Server could not start: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BroadcastError::MissingConfigError { .. } => {
                "Set DOMAIN (or pass --domain) to the name the backends are registered under"
            }
            BroadcastError::InvalidConfigValueError { .. } => {
                "Check the environment variables and flags listed by --help"
            }
            BroadcastError::IoError(_) => {
                "Make sure LISTEN_SERVER:LISTEN_PORT is free and the process may bind it"
            }
            BroadcastError::ResolveError { .. } => "Check DNS for the configured domain",
            _ => "Check that at least one backend is reachable on the target port",
        }
    }
}

// Clients only ever see a bare 500; the cause goes to the log.
impl IntoResponse for BroadcastError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let reason = status.canonical_reason().unwrap_or("Internal Server Error");
        (status, format!("{}\n", reason)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, BroadcastError>;
