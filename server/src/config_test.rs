use std::collections::HashMap;

use client::config::{DEFAULT_API_BASE_URL, DEFAULT_WS_URL};

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn from_lookup_uses_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.client.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.client.ws_url, DEFAULT_WS_URL);
}

#[test]
fn from_lookup_reads_overrides() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("PARKING_API_BASE_URL", "https://parking.example/api/"),
        ("PARKING_WS_URL", "wss://parking.example/ws/camara-directa"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.client.api_base_url, "https://parking.example/api");
    assert_eq!(cfg.client.ws_url, "wss://parking.example/ws/camara-directa");
}

#[test]
fn from_lookup_blank_port_falls_back() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "  ")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
}

#[test]
fn from_lookup_rejects_bad_port() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPort { var: "PORT", value: "eighty".to_owned() });
    assert_eq!(err.to_string(), "invalid PORT: \"eighty\" is not a port number");
}

#[test]
fn from_lookup_rejects_out_of_range_port() {
    assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}
