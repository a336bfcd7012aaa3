//! Record lists: the records page, invoice history, and detection feed.
//!
//! Filtering and ordering run client-side over whatever the backend
//! returned, so they are plain functions over `&[Record]`.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use std::cmp::Reverse;

use crate::net::types::Record;
use crate::util::clock::{parse_date, parse_timestamp_ms};

/// How many entries the detection feed shows.
pub const RECENT_LIMIT: usize = 10;

/// Filters from the records page. Empty strings mean "any".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub plate: String,
    pub vehicle_type: String,
    /// `YYYY-MM-DD`, inclusive from the start of the day.
    pub from: String,
    /// `YYYY-MM-DD`, inclusive through the end of the day.
    pub to: String,
}

impl RecordFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plate.trim().is_empty() && self.vehicle_type.is_empty() && self.from.is_empty() && self.to.is_empty()
    }

    /// Whether `record` passes every active filter. Date filters exclude
    /// records whose entry time cannot be parsed.
    #[must_use]
    pub fn matches(&self, record: &Record, offset_minutes: i64) -> bool {
        let needle = self.plate.trim().to_lowercase();
        if !needle.is_empty() {
            let plate = record.placa_final.as_deref().unwrap_or_default().to_lowercase();
            if !plate.contains(&needle) {
                return false;
            }
        }

        if !self.vehicle_type.is_empty() && record.tipo_vehiculo.as_deref() != Some(self.vehicle_type.as_str()) {
            return false;
        }

        if self.from.is_empty() && self.to.is_empty() {
            return true;
        }
        let Some(entered) = record.hora_entrada.as_deref().and_then(|s| parse_timestamp_ms(s, offset_minutes))
        else {
            return false;
        };
        if let Some(start) = day_bound_ms(&self.from, "T00:00:00", offset_minutes) {
            if entered < start {
                return false;
            }
        }
        if let Some(end) = day_bound_ms(&self.to, "T23:59:59", offset_minutes) {
            if entered > end {
                return false;
            }
        }
        true
    }

    #[must_use]
    pub fn apply(&self, records: &[Record], offset_minutes: i64) -> Vec<Record> {
        records
            .iter()
            .filter(|r| self.matches(r, offset_minutes))
            .cloned()
            .collect()
    }
}

fn day_bound_ms(date: &str, time_suffix: &str, offset_minutes: i64) -> Option<i64> {
    let date = parse_date(date)?;
    parse_timestamp_ms(&format!("{date}{time_suffix}"), offset_minutes)
}

/// The `limit` most recent records, newest first by `timestamp` or entry
/// time. Records without a parseable time sort last.
#[must_use]
pub fn most_recent(records: &[Record], limit: usize, offset_minutes: i64) -> Vec<Record> {
    let mut sorted: Vec<Record> = records.to_vec();
    sorted.sort_by_key(|r| Reverse(r.seen_at().and_then(|s| parse_timestamp_ms(s, offset_minutes))));
    sorted.truncate(limit);
    sorted
}

/// History rows shown when the listing request fails.
#[must_use]
pub fn placeholder_history() -> Vec<Record> {
    vec![
        Record {
            id: 1,
            placa: Some("ABC123".to_owned()),
            hora_entrada: Some("2024-01-15T10:30:00".to_owned()),
            hora_salida: Some("2024-01-15T12:45:00".to_owned()),
            tiempo_total: Some("2h 15m".to_owned()),
            valor_pagado: Some(6000.0),
            estado: Some("cerrado".to_owned()),
            ..Record::default()
        },
        Record {
            id: 2,
            placa: Some("XYZ789".to_owned()),
            hora_entrada: Some("2024-01-15T14:20:00".to_owned()),
            estado: Some("activo".to_owned()),
            ..Record::default()
        },
    ]
}

/// Detection feed entry shown when the listing request fails.
#[must_use]
pub fn placeholder_detections(entered_at: String) -> Vec<Record> {
    vec![Record {
        id: 1,
        placa_final: Some("ABC123".to_owned()),
        tipo_vehiculo: Some("car".to_owned()),
        hora_entrada: Some(entered_at),
        direccion: Some("entrada".to_owned()),
        ..Record::default()
    }]
}

/// Records page state.
#[derive(Clone, Debug, Default)]
pub struct RecordsState {
    pub items: Vec<Record>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: RecordFilter,
}

impl RecordsState {
    #[must_use]
    pub fn visible(&self, offset_minutes: i64) -> Vec<Record> {
        self.filter.apply(&self.items, offset_minutes)
    }
}
