//! Client-side state stores provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `cameras` is the one store written from several views (navbar add,
//! card delete); it lives in a single `RwSignal` owned by the app shell.
//! The others back one page or panel each.

pub mod cameras;
pub mod records;
pub mod stats;
pub mod ui;
pub mod vehicles;
