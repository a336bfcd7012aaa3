//! Networking modules for the REST backend and the live frame relay.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `relay_client` manages the per-camera websocket
//! lifecycle, and `types` defines the backend's wire schema.

pub mod api;
pub mod relay_client;
pub mod types;
