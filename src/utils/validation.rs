use crate::utils::error::{BroadcastError, Result};
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| BroadcastError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BroadcastError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A bare DNS name: no scheme, port, path or whitespace.
pub fn validate_domain(field_name: &str, domain: &str) -> Result<()> {
    validate_non_empty_string(field_name, domain)?;

    let invalid = |reason: &str| BroadcastError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: domain.to_string(),
        reason: reason.to_string(),
    };

    if domain.contains("://") {
        return Err(invalid("Domain must not include a URL scheme"));
    }
    if domain.chars().any(|c| c.is_whitespace() || c == '/' || c == ':') {
        return Err(invalid("Domain must be a bare host name"));
    }
    if domain.len() > 253 {
        return Err(invalid("Domain is longer than 253 characters"));
    }
    if domain
        .trim_end_matches('.')
        .split('.')
        .any(|label| label.is_empty() || label.len() > 63)
    {
        return Err(invalid("Domain contains an empty or oversized label"));
    }
    Ok(())
}

/// Accepts IP literals directly; anything else must resolve locally.
pub fn validate_bind_address(field_name: &str, host: &str, port: u16) -> Result<SocketAddr> {
    validate_non_empty_string(field_name, host)?;

    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }

    (host, port)
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| BroadcastError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: "Not an IP address or resolvable host name".to_string(),
        })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BroadcastError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("domain", "backends.example.com").is_ok());
        assert!(validate_domain("domain", "backends.example.com.").is_ok());
        assert!(validate_domain("domain", "localhost").is_ok());
        assert!(validate_domain("domain", "").is_err());
        assert!(validate_domain("domain", "   ").is_err());
        assert!(validate_domain("domain", "http://example.com").is_err());
        assert!(validate_domain("domain", "example.com:8080").is_err());
        assert!(validate_domain("domain", "example.com/path").is_err());
        assert!(validate_domain("domain", "a..b").is_err());
    }

    #[test]
    fn test_validate_bind_address() {
        let addr = validate_bind_address("listen_server", "0.0.0.0", 80).unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:80");

        let addr = validate_bind_address("listen_server", "::1", 8080).unwrap();
        assert_eq!(addr.to_string(), "[::1]:8080");

        let addr = validate_bind_address("listen_server", "[::]", 80).unwrap();
        assert!(addr.is_ipv6());

        assert!(validate_bind_address("listen_server", "", 80).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("dial_timeout_secs", 5, 1, 300).is_ok());
        assert!(validate_range("dial_timeout_secs", 0, 1, 300).is_err());
        assert!(validate_range("dial_timeout_secs", 301, 1, 300).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("backends.internal".to_string());
        assert!(validate_required_field("DOMAIN", &present).is_ok());

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("DOMAIN", &missing),
            Err(BroadcastError::MissingConfigError { .. })
        ));
    }
}
