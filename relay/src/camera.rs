//! Camera model shared by the dashboard store, the REST client, and the CLI.
//!
//! The backend speaks Spanish field names (`nombre`, `tipo`, `estado`); the
//! Rust side uses English names and maps them with serde attributes so the
//! rest of the workspace never sees the wire spelling.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::RelayError;

/// Source locator used for cameras backed by the viewer's own device.
pub const LOCAL_SOURCE_URL: &str = "local://camera";

/// Name sent in the config message when a camera has no usable name.
pub const DEFAULT_CAMERA_NAME: &str = "Camera";

/// Where a camera's frames come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraKind {
    /// Network camera relayed by the backend. The backend calls it `ip`.
    #[default]
    #[serde(rename = "ip", alias = "remote")]
    Remote,
    /// The viewer's capture device; frames flow browser -> backend -> browser.
    #[serde(rename = "local")]
    Local,
}

impl CameraKind {
    /// Short label for badges.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Remote => "IP",
            Self::Local => "Local",
        }
    }

    #[must_use]
    pub fn is_local(self) -> bool {
        matches!(self, Self::Local)
    }
}

/// Backend-reported camera status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraStatus {
    #[serde(rename = "activo", alias = "activa")]
    Active,
    #[default]
    #[serde(rename = "inactivo", alias = "inactiva")]
    Inactive,
    #[serde(other, rename = "desconocido")]
    Unknown,
}

/// A camera as listed by `GET /camaras`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub id: i64,
    #[serde(rename = "nombre", alias = "name", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "url", default, deserialize_with = "null_as_default")]
    pub source_url: String,
    #[serde(rename = "tipo", default, deserialize_with = "null_as_default")]
    pub kind: CameraKind,
    #[serde(rename = "estado", default, deserialize_with = "null_as_default")]
    pub status: CameraStatus,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Camera {
    /// The relay parameters for this camera.
    #[must_use]
    pub fn source(&self) -> CameraSource {
        CameraSource {
            kind: self.kind,
            url: self.source_url.clone(),
            name: self.name.clone(),
        }
    }
}

/// Relay parameters: which capability the session runs and what it announces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraSource {
    pub kind: CameraKind,
    pub url: String,
    pub name: String,
}

impl CameraSource {
    #[must_use]
    pub fn remote(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: CameraKind::Remote,
            url: url.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            kind: CameraKind::Local,
            url: String::new(),
            name: name.into(),
        }
    }

    /// Name to announce, falling back to [`DEFAULT_CAMERA_NAME`] when blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() { DEFAULT_CAMERA_NAME } else { trimmed }
    }
}

/// Body of `POST /camaras`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewCamera {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: CameraKind,
    pub url: String,
}

impl NewCamera {
    /// Build a create request from form input.
    ///
    /// Local cameras always carry [`LOCAL_SOURCE_URL`]; names and URLs are
    /// trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MissingName`] for a blank name and
    /// [`RelayError::MissingUrl`] for a remote camera without a URL.
    pub fn validate(name: &str, kind: CameraKind, url: &str) -> Result<Self, RelayError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RelayError::MissingName);
        }
        let url = match kind {
            CameraKind::Local => LOCAL_SOURCE_URL.to_owned(),
            CameraKind::Remote => {
                let url = url.trim();
                if url.is_empty() {
                    return Err(RelayError::MissingUrl);
                }
                url.to_owned()
            }
        };
        Ok(Self {
            name: name.to_owned(),
            kind,
            url,
        })
    }

    /// Materialize the camera under a (provisional or confirmed) id.
    #[must_use]
    pub fn into_camera(self, id: i64) -> Camera {
        Camera {
            id,
            name: self.name,
            source_url: self.url,
            kind: self.kind,
            status: CameraStatus::Inactive,
        }
    }
}

/// Response of `POST /camaras`. The backend has used both `camera_id` and `id`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreateCameraResponse {
    #[serde(default)]
    pub camera_id: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
}

impl CreateCameraResponse {
    #[must_use]
    pub fn server_id(&self) -> Option<i64> {
        self.camera_id.or(self.id)
    }
}

/// Cameras shown when the listing request fails.
#[must_use]
pub fn placeholder_cameras() -> Vec<Camera> {
    vec![
        Camera {
            id: 1,
            name: "Entrada Principal".to_owned(),
            source_url: "http://192.168.1.100:8080/video".to_owned(),
            kind: CameraKind::Remote,
            status: CameraStatus::Inactive,
        },
        Camera {
            id: 2,
            name: "Salida Vehicular".to_owned(),
            source_url: "http://192.168.1.101:8080/video".to_owned(),
            kind: CameraKind::Remote,
            status: CameraStatus::Inactive,
        },
    ]
}
