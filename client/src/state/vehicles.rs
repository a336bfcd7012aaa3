//! Vehicles currently parked (`estado=activo` records).

#[cfg(test)]
#[path = "vehicles_test.rs"]
mod vehicles_test;

use crate::net::types::Record;

/// Active vehicles panel state.
#[derive(Clone, Debug, Default)]
pub struct ActiveVehicles {
    pub items: Vec<Record>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ActiveVehicles {
    /// Vehicles whose plate contains `search`, case-insensitively. A blank
    /// search keeps everything.
    #[must_use]
    pub fn matching(&self, search: &str) -> Vec<Record> {
        let needle = search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|r| needle.is_empty() || r.plate().is_some_and(|p| p.to_lowercase().contains(&needle)))
            .cloned()
            .collect()
    }

    /// Drop a vehicle after its invoice was closed (or the close was
    /// attempted).
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|r| r.id != id);
        self.items.len() != before
    }
}

/// Vehicles shown when the active list cannot be loaded. Entry times come
/// from the caller, two hours and 45 minutes in the past.
#[must_use]
pub fn placeholder_vehicles(two_hours_ago: String, minutes_ago_45: String) -> Vec<Record> {
    vec![
        Record {
            id: 1,
            placa: Some("ABC123".to_owned()),
            hora_entrada: Some(two_hours_ago),
            tipo_vehiculo: Some("car".to_owned()),
            camara_id: Some(1),
            estado: Some("activo".to_owned()),
            valor_actual: Some(6000.0),
            horas_transcurridas: Some(2.0),
            factura_id: Some(1),
            ..Record::default()
        },
        Record {
            id: 2,
            placa: Some("XYZ789".to_owned()),
            hora_entrada: Some(minutes_ago_45),
            tipo_vehiculo: Some("motorcycle".to_owned()),
            camara_id: Some(2),
            estado: Some("activo".to_owned()),
            valor_actual: Some(3000.0),
            horas_transcurridas: Some(1.0),
            factura_id: Some(2),
            ..Record::default()
        },
    ]
}
