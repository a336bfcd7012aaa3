//! Parking fee quote shown in the invoice modal.
//!
//! The backend is the tariff authority. When a record already carries
//! `horas_transcurridas` and `valor_actual` those are shown as-is; otherwise
//! the dashboard estimates from the entry time at the flat hourly rate,
//! charging every started hour.

#[cfg(test)]
#[path = "billing_test.rs"]
mod billing_test;

use crate::net::types::Record;
use crate::util::{clock, format};

/// Flat rate per started hour.
pub const HOURLY_RATE: f64 = 3000.0;

/// Time label and amount due for one vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub time_label: String,
    pub amount: f64,
}

/// Amount for `minutes` parked: every started hour is charged.
pub fn amount_for_minutes(minutes: i64) -> f64 {
    let minutes = minutes.max(0);
    let hours = (minutes + 59) / 60;
    #[allow(clippy::cast_precision_loss)]
    let hours = hours as f64;
    hours * HOURLY_RATE
}

/// Quote a record at `now_ms`.
pub fn quote(record: &Record, now_ms: i64, offset_minutes: i64) -> Quote {
    if let (Some(hours), Some(amount)) = (record.horas_transcurridas, record.valor_actual) {
        if hours > 0.0 && amount > 0.0 {
            return Quote {
                time_label: format::hours(hours),
                amount,
            };
        }
    }

    let minutes = record
        .hora_entrada
        .as_deref()
        .and_then(|entry| clock::minutes_since(entry, now_ms, offset_minutes))
        .unwrap_or(0);
    Quote {
        time_label: format::hours_minutes(minutes),
        amount: amount_for_minutes(minutes),
    }
}
