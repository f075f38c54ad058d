pub mod broadcast;
pub mod headers;

pub use crate::domain::model::{InboundRequest, RelayedResponse};
pub use crate::domain::ports::{ConfigProvider, Resolver};
pub use crate::utils::error::Result;
