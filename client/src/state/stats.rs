//! Derived figures for the statistics page.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use crate::net::types::{Record, Stats};
use crate::util::vehicle::{type_color, type_label};

/// Days the daily average is spread over.
pub const AVERAGE_WINDOW_DAYS: u64 = 30;

/// One vehicle type in the bar and pie charts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartRow {
    pub code: String,
    pub label: String,
    pub count: u64,
    pub color: &'static str,
}

/// Chart rows in the backend's type order.
#[must_use]
pub fn chart_rows(stats: &Stats) -> Vec<ChartRow> {
    stats
        .por_tipo_vehiculo
        .iter()
        .map(|(code, count)| ChartRow {
            code: code.clone(),
            label: type_label(code).to_owned(),
            count: *count,
            color: type_color(code),
        })
        .collect()
}

/// Total spread over [`AVERAGE_WINDOW_DAYS`], rounded half up.
#[must_use]
pub fn daily_average(total: u64) -> u64 {
    (total + AVERAGE_WINDOW_DAYS / 2) / AVERAGE_WINDOW_DAYS
}

/// Label of the busiest type; on a tie the later row wins.
#[must_use]
pub fn most_common(rows: &[ChartRow]) -> Option<&str> {
    rows.iter()
        .reduce(|best, row| if best.count > row.count { best } else { row })
        .map(|row| row.label.as_str())
}

/// Statistics page state.
#[derive(Clone, Debug, Default)]
pub struct StatsState {
    pub stats: Stats,
    pub recent: Vec<Record>,
    pub loading: bool,
    pub error: Option<String>,
}
