use super::*;

fn parked() -> ActiveVehicles {
    ActiveVehicles {
        items: placeholder_vehicles("2024-01-15T08:00".to_owned(), "2024-01-15T09:15".to_owned()),
        ..ActiveVehicles::default()
    }
}

#[test]
fn blank_search_keeps_all() {
    assert_eq!(parked().matching("  ").len(), 2);
}

#[test]
fn search_matches_plate_case_insensitively() {
    let found = parked().matching("xyz");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].plate(), Some("XYZ789"));
}

#[test]
fn search_uses_confirmed_plate_when_present() {
    let mut vehicles = parked();
    vehicles.items[0].placa_final = Some("QQQ111".to_owned());
    assert!(vehicles.matching("abc").is_empty());
    assert_eq!(vehicles.matching("qqq").len(), 1);
}

#[test]
fn search_without_match_is_empty() {
    assert!(parked().matching("nope").is_empty());
}

#[test]
fn remove_drops_vehicle_once() {
    let mut vehicles = parked();
    assert!(vehicles.remove(1));
    assert!(!vehicles.remove(1));
    assert_eq!(vehicles.items.len(), 1);
    assert_eq!(vehicles.items[0].id, 2);
}

#[test]
fn placeholders_carry_backend_quotes() {
    let vehicles = parked();
    assert_eq!(vehicles.items[0].valor_actual, Some(6000.0));
    assert_eq!(vehicles.items[0].horas_transcurridas, Some(2.0));
    assert_eq!(vehicles.items[1].tipo_vehiculo.as_deref(), Some("motorcycle"));
}
