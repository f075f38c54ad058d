use crate::domain::ports::Resolver;
use crate::utils::error::{BroadcastError, Result};
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};

/// Resolves through the system resolver, keeping IPv4 answers only.
#[derive(Debug, Clone, Default)]
pub struct DnsResolver;

impl DnsResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for DnsResolver {
    async fn resolve(&self, domain: &str) -> Result<Vec<Ipv4Addr>> {
        tracing::debug!("Resolving {}", domain);

        let addrs = tokio::net::lookup_host((domain, 0))
            .await
            .map_err(|source| BroadcastError::ResolveError {
                domain: domain.to_string(),
                source,
            })?;

        let ips = ipv4_only(addrs.map(|addr| addr.ip()));
        tracing::debug!("{} resolved to {} IPv4 address(es)", domain, ips.len());
        Ok(ips)
    }
}

/// Always answers with the same addresses, whatever the domain.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    addrs: Vec<Ipv4Addr>,
}

impl StaticResolver {
    pub fn new(addrs: Vec<Ipv4Addr>) -> Self {
        Self { addrs }
    }
}

#[async_trait]
impl Resolver for StaticResolver {
    async fn resolve(&self, _domain: &str) -> Result<Vec<Ipv4Addr>> {
        Ok(self.addrs.clone())
    }
}

// Keeps resolver order, drops IPv6 and repeats.
fn ipv4_only(ips: impl IntoIterator<Item = IpAddr>) -> Vec<Ipv4Addr> {
    let mut out: Vec<Ipv4Addr> = Vec::new();
    for ip in ips {
        let v4 = match ip {
            IpAddr::V4(v4) => v4,
            IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => v4,
                None => continue,
            },
        };
        if !out.contains(&v4) {
            out.push(v4);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn test_ipv4_only_filters_and_dedups() {
        let ips = vec![
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
            IpAddr::V6(Ipv6Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
            IpAddr::V6(Ipv4Addr::new(10, 0, 0, 3).to_ipv6_mapped()),
        ];

        assert_eq!(
            ipv4_only(ips),
            vec![
                Ipv4Addr::new(10, 0, 0, 2),
                Ipv4Addr::new(10, 0, 0, 1),
                Ipv4Addr::new(10, 0, 0, 3),
            ]
        );
    }

    #[tokio::test]
    async fn test_dns_resolver_ip_literal() {
        let ips = DnsResolver::new().resolve("127.0.0.1").await.unwrap();
        assert_eq!(ips, vec![Ipv4Addr::LOCALHOST]);
    }

    #[tokio::test]
    async fn test_dns_resolver_unknown_domain() {
        let err = DnsResolver::new()
            .resolve("does-not-exist.invalid")
            .await
            .unwrap_err();
        assert!(matches!(err, BroadcastError::ResolveError { .. }));
    }

    #[tokio::test]
    async fn test_static_resolver_ignores_domain() {
        let resolver = StaticResolver::new(vec![Ipv4Addr::LOCALHOST]);
        let ips = resolver.resolve("anything.example").await.unwrap();
        assert_eq!(ips, vec![Ipv4Addr::LOCALHOST]);
    }
}
