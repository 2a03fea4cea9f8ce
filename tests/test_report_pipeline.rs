//! End-to-end pipeline tests against an in-memory LightningApi.
//!
//! Covers the contract the report depends on: at-most-once alias resolution
//! per outbound channel, tolerance for unresolvable channels, and the
//! aggregate invariants (sum conservation, grouping completeness, exact
//! volume scaling).

use async_trait::async_trait;
use chrono::Local;
use lnflow::aggregate::views;
use lnflow::directory::DirectoryBuilder;
use lnflow::lnd::{ChannelEdge, ForwardingEvent, LightningApi, LightningNode, LndError};
use std::collections::HashMap;
use std::sync::Mutex;

struct MockLightningApi {
    events: Vec<ForwardingEvent>,
    aliases: HashMap<u64, String>,
    fail_node_info: bool,
    channel_info_calls: Mutex<usize>,
    node_info_calls: Mutex<usize>,
}

impl MockLightningApi {
    fn new(events: Vec<ForwardingEvent>, aliases: &[(u64, &str)]) -> Self {
        Self {
            events,
            aliases: aliases
                .iter()
                .map(|(chan_id, alias)| (*chan_id, alias.to_string()))
                .collect(),
            fail_node_info: false,
            channel_info_calls: Mutex::new(0),
            node_info_calls: Mutex::new(0),
        }
    }

    fn channel_info_calls(&self) -> usize {
        *self.channel_info_calls.lock().unwrap()
    }

    fn node_info_calls(&self) -> usize {
        *self.node_info_calls.lock().unwrap()
    }
}

#[async_trait]
impl LightningApi for MockLightningApi {
    async fn forwarding_history(&self, start_time: u64) -> Result<Vec<ForwardingEvent>, LndError> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.timestamp >= start_time)
            .cloned()
            .collect())
    }

    async fn channel_info(&self, chan_id: u64) -> Result<ChannelEdge, LndError> {
        *self.channel_info_calls.lock().unwrap() += 1;
        if self.aliases.contains_key(&chan_id) {
            Ok(ChannelEdge {
                channel_id: chan_id,
                node1_pub: "02self".to_string(),
                node2_pub: format!("03peer_{}", chan_id),
            })
        } else {
            Err(LndError::NotFound(format!("/v1/graph/edge/{}", chan_id)))
        }
    }

    async fn node_info(&self, pub_key: &str) -> Result<LightningNode, LndError> {
        *self.node_info_calls.lock().unwrap() += 1;
        if self.fail_node_info {
            return Err(LndError::Api {
                status: 500,
                message: "node lookup failed".to_string(),
            });
        }
        let chan_id: u64 = pub_key.trim_start_matches("03peer_").parse().unwrap();
        Ok(LightningNode {
            pub_key: pub_key.to_string(),
            alias: self.aliases[&chan_id].clone(),
        })
    }
}

const DAY1_NOON_UTC: u64 = 1_527_854_400; // 2018-06-01 12:00:00 UTC

fn event(
    timestamp: u64,
    chan_id_in: u64,
    chan_id_out: u64,
    fee: u64,
    amt_in: u64,
) -> ForwardingEvent {
    ForwardingEvent {
        timestamp,
        chan_id_in,
        chan_id_out,
        amt_in,
        fee,
    }
}

fn day_label(timestamp: u64) -> String {
    chrono::DateTime::from_timestamp(timestamp as i64, 0)
        .unwrap()
        .with_timezone(&Local)
        .format("%Y/%m/%d")
        .to_string()
}

#[tokio::test]
async fn test_directory_lookups_bounded_by_distinct_channels() {
    // 90 events over 3 distinct outbound channels.
    let mut events = Vec::new();
    for i in 0..90u64 {
        let chan_out = [5, 9, 12][(i % 3) as usize];
        events.push(event(DAY1_NOON_UTC + i, 1, chan_out, 1, 1000));
    }
    let api = MockLightningApi::new(events, &[(5, "Bob"), (9, "Carol"), (12, "Erin")]);

    let history = api.forwarding_history(0).await.unwrap();
    let directory = DirectoryBuilder::new(&api).build(&history).await.unwrap();

    assert_eq!(api.channel_info_calls(), 3);
    assert!(api.node_info_calls() <= 3);
    assert_eq!(directory.len(), 3);
    assert_eq!(directory.alias(12), "Erin");
}

#[tokio::test]
async fn test_unresolvable_channel_keeps_pipeline_alive() {
    let events = vec![
        event(DAY1_NOON_UTC, 1, 5, 10, 1000),
        event(DAY1_NOON_UTC + 60, 1, 7, 20, 1000),
    ];
    let api = MockLightningApi::new(events.clone(), &[(5, "Bob")]);

    let directory = DirectoryBuilder::new(&api).build(&events).await.unwrap();

    let series = views::fees_by_outbound_channel(&events, &directory);
    let by_label: HashMap<String, u64> = series
        .points
        .iter()
        .map(|p| (p.label.clone(), p.value))
        .collect();

    assert_eq!(by_label["Bob : 5"], 10);
    assert_eq!(by_label[" : 7"], 20);
}

#[tokio::test]
async fn test_node_info_failure_is_fatal() {
    let events = vec![event(DAY1_NOON_UTC, 1, 5, 10, 1000)];
    let mut api = MockLightningApi::new(events.clone(), &[(5, "Bob")]);
    api.fail_node_info = true;

    assert!(DirectoryBuilder::new(&api).build(&events).await.is_err());
}

#[tokio::test]
async fn test_two_event_scenario() {
    // Channel 5 resolves to "Bob", channel 7 is unknown to the graph.
    let events = vec![
        event(DAY1_NOON_UTC, 5, 5, 10, 100_000_000),
        event(DAY1_NOON_UTC + 60, 7, 5, 20, 200_000_000),
    ];
    let api = MockLightningApi::new(events.clone(), &[(5, "Bob")]);
    let directory = DirectoryBuilder::new(&api).build(&events).await.unwrap();

    let daily_fees = views::daily_route_fees(&events);
    assert_eq!(daily_fees.len(), 1);
    assert_eq!(daily_fees.points[0].label, day_label(DAY1_NOON_UTC));
    assert_eq!(daily_fees.points[0].value, 30);

    let per_out = views::fees_by_outbound_channel(&events, &directory);
    assert_eq!(per_out.len(), 1);
    assert_eq!(per_out.points[0].label, "Bob : 5");
    assert_eq!(per_out.points[0].value, 30);

    let per_in = views::fees_by_inbound_channel(&events, &directory);
    let by_label: HashMap<String, u64> = per_in
        .points
        .iter()
        .map(|p| (p.label.clone(), p.value))
        .collect();
    assert_eq!(by_label.len(), 2);
    assert_eq!(by_label["Bob : 5"], 10);
    assert_eq!(by_label[" : 7"], 20);

    let volume = views::daily_routing_volume(&events);
    assert_eq!(volume.points[0].value, "3.00000000");
}

#[test]
fn test_cumulative_fees_conserve_the_total() {
    let fees = [3u64, 0, 12, 7, 1, 0, 25];
    let events: Vec<ForwardingEvent> = fees
        .iter()
        .enumerate()
        .map(|(i, &fee)| event(DAY1_NOON_UTC + i as u64, 1, 2, fee, 100))
        .collect();

    let series = views::cumulative_routing_fees(&events);

    assert_eq!(series.len(), events.len());
    assert_eq!(series.points.last().unwrap().value, fees.iter().sum::<u64>());
}

#[test]
fn test_outbound_grouping_is_complete() {
    let events = vec![
        event(DAY1_NOON_UTC, 1, 5, 3, 100),
        event(DAY1_NOON_UTC, 1, 9, 4, 100),
        event(DAY1_NOON_UTC, 1, 5, 5, 100),
        event(DAY1_NOON_UTC, 1, 12, 6, 100),
    ];

    let series =
        views::fees_by_outbound_channel(&events, &lnflow::directory::ChannelDirectory::new());

    let by_label: HashMap<String, u64> = series
        .points
        .iter()
        .map(|p| (p.label.clone(), p.value))
        .collect();
    assert_eq!(by_label.len(), 3);
    assert_eq!(by_label[" : 5"], 8);
    assert_eq!(by_label[" : 9"], 4);
    assert_eq!(by_label[" : 12"], 6);
}

#[tokio::test]
async fn test_build_charts_produces_all_six_views() {
    let events = vec![
        event(DAY1_NOON_UTC, 5, 5, 10, 100_000_000),
        event(DAY1_NOON_UTC + 60, 7, 5, 20, 200_000_000),
    ];
    let api = MockLightningApi::new(events.clone(), &[(5, "Bob")]);
    let directory = DirectoryBuilder::new(&api).build(&events).await.unwrap();

    let charts = lnflow::build_charts(&events, &directory, false);
    assert_eq!(charts.len(), 6);
    assert_eq!(charts[0].title, "Daily Count of Routes Processed");
    assert_eq!(charts[5].title, "Cumulative Sum of Routing Fees");
}
