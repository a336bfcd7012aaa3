//! Sans-IO relay session state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! One session exists per mounted camera view. The driver (browser or native)
//! owns the socket and the timers; the session decides what each transport
//! event means and what the driver should do next.
//!
//! ```text
//! Idle -> Connecting -> Open -> Closed -> (delay) -> Connecting -> ...
//!                 \-> Closed (open failed, longer delay)
//! any state -> Disposed (terminal)
//! ```
//!
//! DESIGN
//! ======
//! Reconnects are scheduled with generation-stamped [`ReconnectTicket`]s.
//! Only the most recently issued ticket is honored, and only once, so a
//! duplicate close notification or a timer that outlives its view can never
//! start a second connection. Disposing cancels the pending ticket.
//!
//! The delay is fixed: no growth, no retry cap. Frames are delivered as they
//! arrive; there is no queue, so the latest frame wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::time::Duration;

use crate::camera::CameraSource;
use crate::protocol::{ConfigMessage, Inbound, classify_text};

/// Delay before reconnecting after a close.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(3);
/// Delay before reconnecting after the socket could not even be created.
pub const FAILED_OPEN_DELAY: Duration = Duration::from_secs(5);
/// How long a latency probe waits for a frame before giving up.
pub const PROBE_TIMEOUT_MS: u64 = 5_000;

/// Connection lifecycle of a relay session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Created, never connected.
    Idle,
    /// Socket created, handshake pending.
    Connecting,
    /// Handshake complete; config message sent.
    Open,
    /// Transport closed or failed; a reconnect may be pending.
    Closed { error: Option<String> },
    /// Owning view unmounted. Terminal.
    Disposed,
}

/// Reconnect schedule for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Wait after a close.
    pub delay: Duration,
    /// Wait after an open attempt fails outright.
    pub failure_delay: Duration,
    /// When false, closes leave the session in `Closed` until an explicit retry.
    pub enabled: bool,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            delay: RECONNECT_DELAY,
            failure_delay: FAILED_OPEN_DELAY,
            enabled: true,
        }
    }
}

impl ReconnectPolicy {
    /// Same policy with both delays set to `delay`.
    #[must_use]
    pub fn fixed(delay: Duration) -> Self {
        Self {
            delay,
            failure_delay: delay,
            enabled: true,
        }
    }
}

/// A scheduled reconnect. The driver sleeps for `delay` and then asks
/// [`RelaySession::reconnect_due`] whether the ticket is still current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconnectTicket {
    generation: u64,
    pub delay: Duration,
}

/// What the driver should do with an inbound message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Decode and draw these JPEG bytes.
    Frame(Vec<u8>),
    /// The server reported an error; already reflected in the status.
    ServerError(String),
    /// Nothing to do.
    Ignored,
}

/// Verdict for an outbound frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outbound {
    Send,
    Drop,
}

/// Counters shown by the stream console.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames_received: u64,
    pub frames_sent: u64,
    pub frames_dropped: u64,
    pub connect_attempts: u64,
    pub last_frame_bytes: Option<usize>,
    pub last_received_ms: Option<u64>,
    pub last_sent_ms: Option<u64>,
    pub last_latency_ms: Option<u64>,
    probe_started_ms: Option<u64>,
}

impl SessionStats {
    #[must_use]
    pub fn probe_pending(&self) -> bool {
        self.probe_started_ms.is_some()
    }
}

/// Relay session core. See the module docs for the lifecycle.
#[derive(Clone, Debug)]
pub struct RelaySession {
    source: CameraSource,
    policy: ReconnectPolicy,
    state: SessionState,
    last_error: Option<String>,
    generation: u64,
    pending: Option<u64>,
    stats: SessionStats,
}

impl RelaySession {
    #[must_use]
    pub fn new(source: CameraSource, policy: ReconnectPolicy) -> Self {
        Self {
            source,
            policy,
            state: SessionState::Idle,
            last_error: None,
            generation: 0,
            pending: None,
            stats: SessionStats::default(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &CameraSource {
        &self.source
    }

    #[must_use]
    pub fn policy(&self) -> ReconnectPolicy {
        self.policy
    }

    /// Replace the reconnect policy. Takes effect at the next close.
    pub fn set_policy(&mut self, policy: ReconnectPolicy) {
        self.policy = policy;
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open)
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        matches!(self.state, SessionState::Disposed)
    }

    #[must_use]
    pub fn reconnect_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// User-facing status line.
    #[must_use]
    pub fn status(&self) -> String {
        match &self.state {
            SessionState::Idle => "Idle".to_owned(),
            SessionState::Connecting => "Connecting...".to_owned(),
            SessionState::Open => self.last_error.clone().unwrap_or_else(|| "Connected".to_owned()),
            SessionState::Closed { error: Some(error) } => error.clone(),
            SessionState::Closed { error: None } => "Disconnected".to_owned(),
            SessionState::Disposed => "Stopped".to_owned(),
        }
    }

    /// Start a connection attempt.
    ///
    /// Returns `false` (and changes nothing) while already connecting or
    /// open, or after dispose. Any pending reconnect ticket is consumed.
    pub fn begin_connect(&mut self) -> bool {
        match self.state {
            SessionState::Connecting | SessionState::Open | SessionState::Disposed => false,
            SessionState::Idle | SessionState::Closed { .. } => {
                self.pending = None;
                self.state = SessionState::Connecting;
                self.stats.connect_attempts = self.stats.connect_attempts.saturating_add(1);
                true
            }
        }
    }

    /// The socket could not be created. Schedules a reconnect after the
    /// failure delay.
    pub fn connect_failed(&mut self, error: impl Into<String>) -> Option<ReconnectTicket> {
        if !matches!(self.state, SessionState::Connecting) {
            return None;
        }
        let error = error.into();
        self.last_error = Some(error.clone());
        self.state = SessionState::Closed { error: Some(error) };
        self.schedule(self.policy.failure_delay)
    }

    /// Handshake completed. Returns the config message the driver must send
    /// before anything else.
    pub fn on_open(&mut self) -> Option<ConfigMessage> {
        if !matches!(self.state, SessionState::Connecting) {
            return None;
        }
        self.state = SessionState::Open;
        self.last_error = None;
        Some(ConfigMessage::for_source(&self.source))
    }

    /// Binary payload received.
    pub fn on_binary(&mut self, bytes: Vec<u8>, now_ms: u64) -> Delivery {
        if !self.is_open() {
            return Delivery::Ignored;
        }
        self.record_received(bytes.len(), now_ms);
        Delivery::Frame(bytes)
    }

    /// Text payload received.
    pub fn on_text(&mut self, text: &str, now_ms: u64) -> Delivery {
        if !self.is_open() {
            return Delivery::Ignored;
        }
        match classify_text(text) {
            Inbound::Frame(bytes) => {
                self.record_received(bytes.len(), now_ms);
                Delivery::Frame(bytes)
            }
            Inbound::ServerError(message) => {
                self.last_error = Some(message.clone());
                Delivery::ServerError(message)
            }
            Inbound::Ignored => Delivery::Ignored,
        }
    }

    /// A frame could not be decoded. The session stays as it is; the next
    /// frame is unaffected.
    pub fn on_decode_error(&mut self, error: impl Into<String>) {
        if self.is_open() {
            self.last_error = Some(error.into());
        }
    }

    /// A frame was drawn. Clears a stale decode or server error.
    pub fn on_frame_presented(&mut self) {
        if self.is_open() {
            self.last_error = None;
        }
    }

    /// Transport error. The state only changes on the close that follows.
    pub fn on_error(&mut self, error: impl Into<String>) {
        if self.is_disposed() {
            return;
        }
        self.last_error = Some(error.into());
    }

    /// Transport closed.
    ///
    /// Returns a reconnect ticket at most once per close: a second close
    /// notification while already closed yields `None`.
    pub fn on_close(&mut self) -> Option<ReconnectTicket> {
        match self.state {
            SessionState::Connecting | SessionState::Open => {
                self.state = SessionState::Closed {
                    error: self.last_error.clone(),
                };
                self.stats.probe_started_ms = None;
                self.schedule(self.policy.delay)
            }
            SessionState::Idle | SessionState::Closed { .. } | SessionState::Disposed => None,
        }
    }

    /// Whether a sleeping reconnect should proceed. Honors only the current
    /// ticket, only once, and never after dispose.
    pub fn reconnect_due(&mut self, ticket: ReconnectTicket) -> bool {
        if self.is_disposed() || self.pending != Some(ticket.generation) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Explicit retry from the UI. Cancels any pending ticket and abandons
    /// the current connection; the driver tears it down and calls
    /// [`Self::begin_connect`]. Returns `false` after dispose.
    pub fn request_reconnect(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.pending = None;
        self.last_error = None;
        self.stats.probe_started_ms = None;
        self.state = SessionState::Idle;
        true
    }

    /// Operator-initiated disconnect: the driver drops the transport and no
    /// reconnect is scheduled. Returns `false` after dispose.
    pub fn disconnect(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.pending = None;
        self.stats.probe_started_ms = None;
        self.state = SessionState::Closed { error: None };
        true
    }

    /// Decide whether an outbound frame of `len` bytes goes out. Frames
    /// offered while not open are dropped and counted.
    pub fn offer_outbound(&mut self, len: usize, now_ms: u64) -> Outbound {
        if !self.is_open() {
            self.stats.frames_dropped = self.stats.frames_dropped.saturating_add(1);
            return Outbound::Drop;
        }
        self.stats.frames_sent = self.stats.frames_sent.saturating_add(1);
        self.stats.last_frame_bytes = Some(len);
        self.stats.last_sent_ms = Some(now_ms);
        Outbound::Send
    }

    /// Start a latency probe: the next received frame resolves it.
    /// Returns `false` when not open.
    pub fn start_probe(&mut self, now_ms: u64) -> bool {
        if !self.is_open() {
            return false;
        }
        self.stats.probe_started_ms = Some(now_ms);
        true
    }

    /// Expire a probe older than [`PROBE_TIMEOUT_MS`]. Returns `true` when
    /// a probe timed out.
    pub fn expire_probe(&mut self, now_ms: u64) -> bool {
        let Some(started) = self.stats.probe_started_ms else {
            return false;
        };
        if now_ms.saturating_sub(started) < PROBE_TIMEOUT_MS {
            return false;
        }
        self.stats.probe_started_ms = None;
        self.last_error = Some("No response to test within 5s".to_owned());
        true
    }

    /// Owning view unmounted. Terminal; cancels the pending reconnect.
    pub fn dispose(&mut self) {
        self.pending = None;
        self.stats.probe_started_ms = None;
        self.state = SessionState::Disposed;
    }

    fn schedule(&mut self, delay: Duration) -> Option<ReconnectTicket> {
        if !self.policy.enabled {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(self.generation);
        Some(ReconnectTicket {
            generation: self.generation,
            delay,
        })
    }

    fn record_received(&mut self, len: usize, now_ms: u64) {
        self.stats.frames_received = self.stats.frames_received.saturating_add(1);
        self.stats.last_frame_bytes = Some(len);
        self.stats.last_received_ms = Some(now_ms);
        if let Some(started) = self.stats.probe_started_ms.take() {
            self.stats.last_latency_ms = Some(now_ms.saturating_sub(started));
        }
    }
}
