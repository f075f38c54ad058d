// Adapters layer: concrete implementations of the domain ports.

pub mod resolver;

pub use resolver::{DnsResolver, StaticResolver};
