use super::*;

// 2024-01-15T10:30:00Z
const ENTRY_MS: i64 = 1_705_314_600_000;

fn parked_at(entry: &str) -> Record {
    Record {
        id: 1,
        hora_entrada: Some(entry.to_owned()),
        ..Record::default()
    }
}

#[test]
fn partial_hours_round_up() {
    assert!((amount_for_minutes(0) - 0.0).abs() < f64::EPSILON);
    assert!((amount_for_minutes(1) - 3000.0).abs() < f64::EPSILON);
    assert!((amount_for_minutes(60) - 3000.0).abs() < f64::EPSILON);
    assert!((amount_for_minutes(61) - 6000.0).abs() < f64::EPSILON);
    assert!((amount_for_minutes(135) - 9000.0).abs() < f64::EPSILON);
}

#[test]
fn backend_values_win_when_present() {
    let record = Record {
        horas_transcurridas: Some(2.0),
        valor_actual: Some(6000.0),
        ..parked_at("2024-01-15T10:30:00")
    };
    let quote = quote(&record, ENTRY_MS + 10 * 3_600_000, 0);
    assert_eq!(quote.time_label, "2h");
    assert!((quote.amount - 6000.0).abs() < f64::EPSILON);
}

#[test]
fn zero_backend_values_fall_back_to_estimate() {
    let record = Record {
        horas_transcurridas: Some(0.0),
        valor_actual: Some(0.0),
        ..parked_at("2024-01-15T10:30:00")
    };
    let quote = quote(&record, ENTRY_MS + 45 * 60_000, 0);
    assert_eq!(quote.time_label, "0h 45m");
    assert!((quote.amount - 3000.0).abs() < f64::EPSILON);
}

#[test]
fn estimate_from_entry_time() {
    let record = parked_at("2024-01-15T10:30:00");
    let quote = quote(&record, ENTRY_MS + 125 * 60_000, 0);
    assert_eq!(quote.time_label, "2h 5m");
    assert!((quote.amount - 9000.0).abs() < f64::EPSILON);
}

#[test]
fn missing_entry_time_quotes_zero() {
    let quote = quote(&Record::default(), ENTRY_MS, 0);
    assert_eq!(quote.time_label, "0h 0m");
    assert!(quote.amount.abs() < f64::EPSILON);
}
