pub mod api;
pub mod rest_client;

pub use api::{
    ChannelEdge, ForwardingEvent, LightningApi, LightningNode, LndError, HISTORY_START_TIME,
};
pub use rest_client::LndRestClient;
