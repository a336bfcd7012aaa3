//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (clock, canvas,
//! camera, storage) from page and component logic so the pure parts can be
//! tested natively.

pub mod billing;
pub mod capture;
pub mod clock;
pub mod format;
pub mod frame_render;
pub mod theme;
pub mod vehicle;
