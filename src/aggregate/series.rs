//! Series and bucket primitives shared by the aggregate views.

use std::collections::{HashMap, HashSet};

/// One (label, value) pair in an aggregate series.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<V> {
    pub label: String,
    pub value: V,
}

/// Ordered (label, value) pairs produced by one aggregate view.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<V> {
    pub points: Vec<Point<V>>,
}

impl<V> Series<V> {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn push(&mut self, label: String, value: V) {
        self.points.push(Point { label, value });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    /// Lexicographic label sort; `YYYY/MM/DD` day keys sort chronologically.
    pub fn sort_by_label(&mut self) {
        self.points.sort_by(|a, b| a.label.cmp(&b.label));
    }
}

impl<V> Default for Series<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Insertion-ordered accumulator keyed by calendar day.
///
/// A day enters the label order the first time its running total becomes
/// positive, so output order follows input arrival order, not the calendar.
#[derive(Debug, Default)]
pub struct DayBuckets {
    order: Vec<String>,
    labeled: HashSet<String>,
    totals: HashMap<String, u64>,
}

impl DayBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, day: &str, amount: u64) {
        let total = self.totals.entry(day.to_string()).or_insert(0);
        *total += amount;

        if *total > 0 && self.labeled.insert(day.to_string()) {
            self.order.push(day.to_string());
        }
    }

    pub fn into_series(mut self) -> Series<u64> {
        let mut series = Series::new();
        for day in self.order {
            let total = self.totals.remove(&day).unwrap_or(0);
            series.push(day, total);
        }
        series
    }
}

/// Render a smallest-unit sum as a fixed-point BTC string with exactly
/// eight fractional digits. Integer arithmetic only, no precision loss.
pub fn format_volume(amount: u64) -> String {
    format!("{}.{:08}", amount / 100_000_000, amount % 100_000_000)
}
