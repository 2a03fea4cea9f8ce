//! The six aggregate views over the forwarding history.
//!
//! Each view is a single pass over the same immutable event slice and owns
//! its accumulator; no state is shared between views. Day keys use local
//! wall-clock time.

use super::series::{format_volume, DayBuckets, Series};
use crate::directory::ChannelDirectory;
use crate::lnd::api::ForwardingEvent;
use chrono::{DateTime, Local};
use std::collections::HashMap;

fn local_time(timestamp: u64) -> DateTime<Local> {
    DateTime::from_timestamp(timestamp as i64, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
}

/// Local-wall-clock day key, `YYYY/MM/DD`.
fn day_key(timestamp: u64) -> String {
    local_time(timestamp).format("%Y/%m/%d").to_string()
}

/// Count of routes processed per calendar day.
pub fn daily_route_count(events: &[ForwardingEvent]) -> Series<u64> {
    let mut buckets = DayBuckets::new();
    for event in events {
        buckets.add(&day_key(event.timestamp), 1);
    }
    buckets.into_series()
}

/// Sum of routing fees per calendar day.
pub fn daily_route_fees(events: &[ForwardingEvent]) -> Series<u64> {
    let mut buckets = DayBuckets::new();
    for event in events {
        buckets.add(&day_key(event.timestamp), event.fee);
    }
    buckets.into_series()
}

/// Routed volume per calendar day, rendered as a fixed-point BTC string.
pub fn daily_routing_volume(events: &[ForwardingEvent]) -> Series<String> {
    let mut buckets = DayBuckets::new();
    for event in events {
        buckets.add(&day_key(event.timestamp), event.amt_in);
    }

    let mut series = Series::new();
    for point in buckets.into_series().points {
        series.push(point.label, format_volume(point.value));
    }
    series
}

/// Running fee sum across events in input order: one point per event,
/// labeled with the event's full local date-time.
pub fn cumulative_routing_fees(events: &[ForwardingEvent]) -> Series<u64> {
    let mut series = Series::new();
    let mut sum: u64 = 0;
    for event in events {
        sum += event.fee;
        series.push(local_time(event.timestamp).to_string(), sum);
    }
    series
}

/// Fee sum per inbound channel.
///
/// The directory is keyed by outbound channel IDs, so an inbound channel
/// resolves to an alias only when it also appeared as an outbound leg;
/// otherwise the label degrades to `" : <chan_id>"`.
pub fn fees_by_inbound_channel(
    events: &[ForwardingEvent],
    directory: &ChannelDirectory,
) -> Series<u64> {
    fees_by_channel(events, directory, |event| event.chan_id_in)
}

/// Fee sum per outbound channel.
pub fn fees_by_outbound_channel(
    events: &[ForwardingEvent],
    directory: &ChannelDirectory,
) -> Series<u64> {
    fees_by_channel(events, directory, |event| event.chan_id_out)
}

fn fees_by_channel<F>(
    events: &[ForwardingEvent],
    directory: &ChannelDirectory,
    leg: F,
) -> Series<u64>
where
    F: Fn(&ForwardingEvent) -> u64,
{
    let mut totals: HashMap<u64, u64> = HashMap::new();
    for event in events {
        *totals.entry(leg(event)).or_insert(0) += event.fee;
    }

    let mut series = Series::new();
    for (chan_id, fee) in totals {
        series.push(format!("{} : {}", directory.alias(chan_id), chan_id), fee);
    }
    series
}
