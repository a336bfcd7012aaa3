//! Shared camera model, wire protocol, and relay session core.
//!
//! This crate owns everything the live frame relay needs that does not touch
//! a socket: the configuration message announced on open, classification of
//! inbound payloads, the connection state machine with its fixed-delay
//! reconnect schedule, the temporary-reference ledger used when frames are
//! presented, and the pacing rules for local capture. Both the browser
//! driver in `client` and the native driver in `cli` run on top of it.
//!
//! ARCHITECTURE
//! ============
//! Drivers own the transport and the timers. They feed transport events into
//! [`RelaySession`] and act on what it returns (a message to send, a frame to
//! draw, a reconnect ticket to sleep on). Keeping the core free of IO lets
//! the reconnect and drop rules be tested natively.

pub mod camera;
pub mod capture;
pub mod protocol;
pub mod session;
pub mod surface;

pub use camera::{
    Camera, CameraKind, CameraSource, CameraStatus, CreateCameraResponse, LOCAL_SOURCE_URL, NewCamera,
    placeholder_cameras,
};
pub use capture::{CapturePacer, CaptureSettings, Resolution};
pub use protocol::{ConfigMessage, ConfigType, Inbound, classify_text, looks_like_jpeg};
pub use session::{
    Delivery, Outbound, ReconnectPolicy, ReconnectTicket, RelaySession, SessionState, SessionStats,
};
pub use surface::{PresentError, RefRegistry, ScopedRef, present_frame};

/// Errors produced while building or validating relay inputs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RelayError {
    /// A camera was submitted without a display name.
    #[error("camera name is required")]
    MissingName,
    /// A remote camera was submitted without a source URL.
    #[error("camera url is required for remote cameras")]
    MissingUrl,
    /// The configuration message could not be serialized.
    #[error("failed to encode config message: {0}")]
    Encode(String),
    /// A resolution string was neither `auto` nor `WIDTHxHEIGHT`.
    #[error("invalid resolution: {0}")]
    InvalidResolution(String),
}
