//! Domain types and the `LightningApi` seam the pipeline depends on.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

/// Start of the forwarding history window: 2018-01-01T00:00:00Z.
pub const HISTORY_START_TIME: u64 = 1_514_764_800;

/// One payment routed through the node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForwardingEvent {
    /// Seconds since epoch. The history is not guaranteed to be sorted.
    #[serde(default, deserialize_with = "u64_string")]
    pub timestamp: u64,
    #[serde(default, deserialize_with = "u64_string")]
    pub chan_id_in: u64,
    #[serde(default, deserialize_with = "u64_string")]
    pub chan_id_out: u64,
    /// Amount routed in, in the smallest unit (sats).
    #[serde(default, deserialize_with = "u64_string")]
    pub amt_in: u64,
    /// Fee earned, in sats.
    #[serde(default, deserialize_with = "u64_string")]
    pub fee: u64,
}

/// One edge of the channel graph.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelEdge {
    #[serde(default, deserialize_with = "u64_string")]
    pub channel_id: u64,
    #[serde(default)]
    pub node1_pub: String,
    #[serde(default)]
    pub node2_pub: String,
}

/// Graph metadata for a single node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LightningNode {
    #[serde(default)]
    pub pub_key: String,
    #[serde(default)]
    pub alias: String,
}

/// LND REST encodes uint64 fields as decimal strings.
fn u64_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        Some(s) => s.parse().map_err(serde::de::Error::custom),
        None => Ok(0),
    }
}

#[derive(Debug)]
pub enum LndError {
    Http(reqwest::Error),
    Api { status: u16, message: String },
    NotFound(String),
    InvalidResponse(String),
    Credentials(std::io::Error),
}

impl std::fmt::Display for LndError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LndError::Http(e) => write!(f, "HTTP error: {}", e),
            LndError::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            LndError::NotFound(resource) => write!(f, "not found: {}", resource),
            LndError::InvalidResponse(msg) => write!(f, "invalid response: {}", msg),
            LndError::Credentials(e) => write!(f, "cannot read credentials: {}", e),
        }
    }
}

impl std::error::Error for LndError {}

impl From<reqwest::Error> for LndError {
    fn from(err: reqwest::Error) -> Self {
        LndError::Http(err)
    }
}

/// The three remote calls the pipeline consumes.
///
/// `channel_info` fails with [`LndError::NotFound`] when the channel is
/// unknown to the graph (closed or pruned channels in old history).
#[async_trait]
pub trait LightningApi: Send + Sync {
    /// Full forwarding history from `start_time`, no end bound.
    async fn forwarding_history(&self, start_time: u64) -> Result<Vec<ForwardingEvent>, LndError>;

    async fn channel_info(&self, chan_id: u64) -> Result<ChannelEdge, LndError>;

    async fn node_info(&self, pub_key: &str) -> Result<LightningNode, LndError>;
}
