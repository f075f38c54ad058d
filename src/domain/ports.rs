use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn domain(&self) -> &str;
    fn target_port(&self) -> u16;
    fn dial_timeout(&self) -> Duration;
}

/// Turns the configured domain into the list of backends to broadcast to.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, domain: &str) -> Result<Vec<Ipv4Addr>>;
}
