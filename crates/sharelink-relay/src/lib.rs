pub mod client;
pub mod error;
pub mod extract;
pub mod location;
pub mod mapper;
pub mod relay;
pub mod types;

pub use client::{RelayClient, UpstreamReply, MAX_SHARE_BODY_BYTES};
pub use error::RelayError;
pub use location::Resolution;
pub use mapper::map_products;
pub use relay::{PcodesDebug, RelayOutcome, RelayResponse};
pub use types::{RelayItem, UpstreamProduct};
