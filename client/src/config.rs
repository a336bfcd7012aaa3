//! Backend endpoint configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server reads `PARKING_API_BASE_URL` / `PARKING_WS_URL` from its
//! environment and renders them into `<meta>` tags in the HTML shell. During
//! SSR the config comes straight from the environment; after hydration it
//! is read back from those tags, so both sides render with the same values.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Default REST base URL of the parking backend.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
/// Default relay endpoint.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws/camara-directa";

pub const API_META_NAME: &str = "parking-api-base-url";
pub const WS_META_NAME: &str = "parking-ws-url";

pub const API_ENV_VAR: &str = "PARKING_API_BASE_URL";
pub const WS_ENV_VAR: &str = "PARKING_WS_URL";

/// Where the dashboard finds the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub ws_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            ws_url: DEFAULT_WS_URL.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build from optional raw values, falling back to defaults for missing
    /// or blank entries.
    pub fn from_values(api_base_url: Option<String>, ws_url: Option<String>) -> Self {
        let api_base_url = non_blank(api_base_url)
            .map(|v| normalize_base(&v))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let ws_url = non_blank(ws_url).unwrap_or_else(|| DEFAULT_WS_URL.to_owned());
        Self { api_base_url, ws_url }
    }

    /// Config for the current render environment.
    pub fn current() -> Self {
        #[cfg(feature = "hydrate")]
        {
            Self::from_values(read_meta(API_META_NAME), read_meta(WS_META_NAME))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::from_values(std::env::var(API_ENV_VAR).ok(), std::env::var(WS_ENV_VAR).ok())
        }
    }

    /// Absolute URL for an API path such as `/camaras`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

#[cfg(feature = "hydrate")]
fn read_meta(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()
        .flatten()?;
    element.get_attribute("content")
}
