pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::{DnsResolver, StaticResolver};
pub use config::{BroadcasterConfig, LogFormat};
pub use core::broadcast::Broadcaster;
pub use domain::model::{InboundRequest, RelayedResponse};
pub use utils::error::{BroadcastError, Result};
