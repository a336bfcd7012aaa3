//! REST DTOs for the parking backend.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON exactly. Nearly every field is
//! optional on the wire, so they are `Option`s with `#[serde(default)]`
//! rather than failing a whole list on one sparse row.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use relay::{Camera, CreateCameraResponse, NewCamera};

/// A detection/billing record (`registro`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placa_final: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_vehiculo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hora_entrada: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hora_salida: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor_actual: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor_pagado: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horas_transcurridas: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiempo_total: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_imagen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camara_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factura_id: Option<i64>,
}

impl Record {
    /// Best plate reading: the confirmed plate, else the raw detection.
    pub fn plate(&self) -> Option<&str> {
        self.placa_final
            .as_deref()
            .or(self.placa.as_deref())
            .filter(|p| !p.trim().is_empty())
    }

    /// Timestamp used for recency ordering.
    pub fn seen_at(&self) -> Option<&str> {
        self.timestamp.as_deref().or(self.hora_entrada.as_deref())
    }
}

/// Editable subset of a record, sent by create/update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RecordDraft {
    pub placa_final: String,
    pub tipo_vehiculo: String,
    pub direccion: String,
    pub hora_entrada: String,
}

impl RecordDraft {
    pub fn from_record(record: &Record) -> Self {
        Self {
            placa_final: record.plate().unwrap_or_default().to_owned(),
            tipo_vehiculo: record.tipo_vehiculo.clone().unwrap_or_else(|| "car".to_owned()),
            direccion: record.direccion.clone().unwrap_or_else(|| "entrada".to_owned()),
            hora_entrada: record.hora_entrada.clone().unwrap_or_default(),
        }
    }
}

/// `GET /stats`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_registros: u64,
    #[serde(default)]
    pub registros_hoy: u64,
    #[serde(default)]
    pub por_tipo_vehiculo: BTreeMap<String, u64>,
}

/// `POST /detect`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub placa_detectada: Option<String>,
    #[serde(default)]
    pub tipo_vehiculo: Option<String>,
    #[serde(default)]
    pub registro_id: Option<i64>,
}

/// `PATCH /facturas/{id}/cerrar`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CloseInvoiceRequest {
    pub valor_pagado: f64,
    pub hora_salida: String,
}

/// List responses come either bare or wrapped under `camaras`/`registros`.
///
/// A row that fails to decode fails the whole list, so callers fall back to
/// placeholders with a banner instead of rendering an empty screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ListEnvelope<T>(Vec<T>);

impl<'de, T: DeserializeOwned> Deserialize<'de> for ListEnvelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = match Value::deserialize(deserializer)? {
            items @ Value::Array(_) => items,
            Value::Object(mut map) => ["camaras", "registros"]
                .iter()
                .find_map(|key| map.remove(*key))
                .ok_or_else(|| D::Error::custom("list response has no `camaras` or `registros` field"))?,
            other => return Err(D::Error::custom(format!("expected a list response, got {other}"))),
        };
        serde_json::from_value(items).map(Self).map_err(D::Error::custom)
    }
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        self.0
    }
}

/// Query filters for `GET /registros`. Empty values are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub estado: Option<String>,
    pub limit: Option<u32>,
}

impl RecordQuery {
    pub fn active() -> Self {
        Self {
            estado: Some("activo".to_owned()),
            limit: None,
        }
    }

    pub fn recent(limit: u32) -> Self {
        Self {
            estado: None,
            limit: Some(limit),
        }
    }

    /// `?estado=activo&limit=10`, or an empty string when nothing is set.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(estado) = self.estado.as_deref().filter(|v| !v.is_empty()) {
            serializer.append_pair("estado", estado);
        }
        if let Some(limit) = self.limit {
            serializer.append_pair("limit", &limit.to_string());
        }
        let encoded = serializer.finish();
        if encoded.is_empty() { encoded } else { format!("?{encoded}") }
    }
}
