//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard chrome, camera tiles, and billing dialogs while
//! reading/writing shared state from Leptos context providers.

pub mod add_camera;
pub mod camera_card;
pub mod camera_grid;
pub mod camera_viewer;
pub mod charts;
pub mod detection_panel;
pub mod error_page;
pub mod invoice_history;
pub mod invoice_modal;
pub mod navbar;
pub mod record_form;
pub mod relay_view;
pub mod stats_card;
pub mod toast_stack;
pub mod vehicle_card;
