//! Channel directory: memoized channel ID to peer identity resolution.
//!
//! The directory is built once per run from the outbound leg of every
//! forwarding event and is append-only: the first resolution for a channel
//! ID wins and is never re-fetched.

use crate::lnd::api::{ForwardingEvent, LightningApi, LndError};
use std::collections::HashMap;

/// Metadata for the remote peer reachable via a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerIdentity {
    pub public_key: String,
    pub alias: String,
}

/// Mapping from channel ID to the peer on the far side.
#[derive(Debug, Default)]
pub struct ChannelDirectory {
    entries: HashMap<u64, PeerIdentity>,
}

impl ChannelDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, chan_id: u64) -> bool {
        self.entries.contains_key(&chan_id)
    }

    pub fn get(&self, chan_id: u64) -> Option<&PeerIdentity> {
        self.entries.get(&chan_id)
    }

    /// Alias for a channel; empty string when the channel was never resolved.
    pub fn alias(&self, chan_id: u64) -> &str {
        self.entries
            .get(&chan_id)
            .map(|peer| peer.alias.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry for a channel ID wins; later inserts are ignored.
    pub fn insert(&mut self, chan_id: u64, peer: PeerIdentity) {
        self.entries.entry(chan_id).or_insert(peer);
    }
}

/// Resolve-or-insert cache over a [`LightningApi`].
///
/// Bounds remote lookups to the number of distinct outbound channel IDs,
/// not the number of events.
pub struct DirectoryBuilder<'a, A: LightningApi> {
    api: &'a A,
    directory: ChannelDirectory,
}

impl<'a, A: LightningApi> DirectoryBuilder<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            directory: ChannelDirectory::new(),
        }
    }

    /// Resolve a channel ID, issuing at most one channel-info lookup per key.
    ///
    /// A channel-info miss is tolerated (closed or pruned channels show up
    /// in old history) and leaves the directory untouched; a node-info
    /// failure aborts the build.
    pub async fn resolve(&mut self, chan_id: u64) -> Result<(), LndError> {
        if self.directory.contains(chan_id) {
            return Ok(());
        }

        let edge = match self.api.channel_info(chan_id).await {
            Ok(edge) => edge,
            Err(err) => {
                log::warn!("cannot get channel info for {}: {}", chan_id, err);
                return Ok(());
            }
        };

        // node2 is the far side of the edge as reported for our channels
        let node = self.api.node_info(&edge.node2_pub).await?;

        self.directory.insert(
            chan_id,
            PeerIdentity {
                public_key: node.pub_key,
                alias: node.alias,
            },
        );

        Ok(())
    }

    /// Scan every event once, in input order, resolving each outbound leg.
    pub async fn build(mut self, events: &[ForwardingEvent]) -> Result<ChannelDirectory, LndError> {
        for event in events {
            self.resolve(event.chan_id_out).await?;
        }
        Ok(self.directory)
    }
}
