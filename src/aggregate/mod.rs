//! Aggregation engine: six independent reducers over the forwarding history.
//!
//! # Architecture
//!
//! ```text
//! LndRestClient → ForwardingEvent history
//!     ↓
//! DirectoryBuilder (chan_id_out → PeerIdentity, first-seen wins)
//!     ↓
//! views::* (six single-pass reducers, no shared state)
//!     ↓
//! report::write_report → report.html
//! ```

pub mod series;
pub mod views;

pub use series::{format_volume, DayBuckets, Point, Series};
