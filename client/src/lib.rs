//! # client
//!
//! Leptos + WASM frontend for the SmartParking operator dashboard.
//!
//! This crate contains pages, components, the camera/record/vehicle stores,
//! the REST client for the parking backend, and the browser driver for the
//! live frame relay. Protocol and reconnect rules live in the `relay` crate;
//! this crate only wires them to sockets, canvases, and signals.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs panic/log hooks and hydrates the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
