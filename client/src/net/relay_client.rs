//! Browser driver for the live frame relay.
//!
//! One driver runs per mounted camera view. It owns the `WebSocket`, feeds
//! every transport event into a [`RelaySession`], and draws the frames the
//! session hands back onto the view's canvas.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment.
//!
//! DESIGN
//! ======
//! The connection loop runs inside an `Abortable` task. Retry, disconnect,
//! and unmount abort the task, which drops the socket and closes it; the
//! session decides whether anything reconnects afterwards. Outbound frames
//! are checked against the session before they reach the send channel, so
//! frames captured while the socket is not open are dropped instead of
//! queued. Each inbound frame is presented in its own task: the last draw to
//! finish stays on screen.
//!
//! ERROR HANDLING
//! ==============
//! Open failures, transport errors, and decode failures are all recorded on
//! the session and surface through [`RelaySnapshot::status`]. None of them
//! propagate past the driver.

#[cfg(test)]
#[path = "relay_client_test.rs"]
mod relay_client_test;

use relay::{RelaySession, SessionState, SessionStats};

/// Render-ready copy of a session, published into a signal after every
/// transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelaySnapshot {
    pub state: SessionState,
    pub status: String,
    pub stats: SessionStats,
    pub has_frame: bool,
}

impl Default for RelaySnapshot {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            status: "Idle".to_owned(),
            stats: SessionStats::default(),
            has_frame: false,
        }
    }
}

impl RelaySnapshot {
    #[must_use]
    pub fn of(session: &RelaySession, has_frame: bool) -> Self {
        Self {
            state: session.state().clone(),
            status: session.status(),
            stats: session.stats().clone(),
            has_frame,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open)
    }

    /// What to draw over the canvas.
    #[must_use]
    pub fn overlay(&self) -> Overlay {
        match &self.state {
            SessionState::Idle | SessionState::Connecting => Overlay::Connecting,
            SessionState::Open if self.has_frame => Overlay::None,
            SessionState::Open => Overlay::Waiting,
            SessionState::Closed { .. } => Overlay::Error(self.status.clone()),
            SessionState::Disposed => Overlay::None,
        }
    }

    /// CSS modifier for the connection badge.
    #[must_use]
    pub fn badge_class(&self) -> &'static str {
        match self.state {
            SessionState::Open => "relay-badge relay-badge--live",
            SessionState::Idle | SessionState::Connecting => "relay-badge relay-badge--connecting",
            SessionState::Closed { .. } | SessionState::Disposed => "relay-badge relay-badge--offline",
        }
    }
}

/// Overlay shown on top of a camera canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Overlay {
    None,
    Connecting,
    Waiting,
    Error(String),
}

/// Outcome of the handshake wait, from the socket's `readyState`.
///
/// A refused connection wakes the wait too, so only `OPEN` (1) counts as a
/// completed handshake.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn handshake_result(ready_state: u16) -> Result<(), String> {
    match ready_state {
        1 => Ok(()),
        0 => Err("connection still pending".to_owned()),
        _ => Err("connection refused".to_owned()),
    }
}

#[cfg(feature = "hydrate")]
pub use driver::{RelayHandle, spawn_relay};

/// Copyable access to a mounted relay, for controls that live outside the
/// view running it. Empty until that view mounts, and always empty on the
/// server.
#[derive(Clone, Copy)]
pub struct RelayControls {
    #[cfg(feature = "hydrate")]
    slot: leptos::prelude::StoredValue<Option<RelayHandle>, leptos::prelude::LocalStorage>,
}

impl Default for RelayControls {
    fn default() -> Self {
        Self {
            #[cfg(feature = "hydrate")]
            slot: leptos::prelude::StoredValue::new_local(None),
        }
    }
}

impl RelayControls {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "hydrate")]
    pub fn attach(&self, handle: RelayHandle) {
        use leptos::prelude::SetValue;
        let _ = self.slot.try_set_value(Some(handle));
    }

    #[cfg(feature = "hydrate")]
    fn with_handle<R>(&self, f: impl FnOnce(&RelayHandle) -> R) -> Option<R> {
        use leptos::prelude::WithValue;
        self.slot.try_with_value(|slot| slot.as_ref().map(f)).flatten()
    }

    /// Offer a captured frame; `None` when no relay is attached.
    #[cfg(feature = "hydrate")]
    pub fn send_frame(&self, bytes: Vec<u8>) -> Option<relay::Outbound> {
        self.with_handle(|h| h.send_frame(bytes))
    }

    #[cfg(feature = "hydrate")]
    pub fn probe(&self, test_frame: Vec<u8>) -> bool {
        self.with_handle(|h| h.probe(test_frame)).unwrap_or(false)
    }

    pub fn reconnect(&self) {
        #[cfg(feature = "hydrate")]
        self.with_handle(RelayHandle::reconnect);
    }

    pub fn disconnect(&self) {
        #[cfg(feature = "hydrate")]
        self.with_handle(RelayHandle::disconnect);
    }

    pub fn set_policy(&self, policy: relay::ReconnectPolicy) {
        #[cfg(feature = "hydrate")]
        self.with_handle(|h| h.set_policy(policy));
        #[cfg(not(feature = "hydrate"))]
        let _ = policy;
    }

    /// Download the last drawn frame.
    ///
    /// # Errors
    ///
    /// Returns a message when no relay is attached or nothing was drawn.
    pub fn save_snapshot(&self, camera_name: &str) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            self.with_handle(|h| h.snapshot(camera_name))
                .unwrap_or_else(|| Err("camera view is not mounted".to_owned()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = camera_name;
            Err("not available on server".to_owned())
        }
    }

    /// Stop the attached relay for good and detach it.
    pub fn shutdown(&self) {
        #[cfg(feature = "hydrate")]
        {
            use leptos::prelude::UpdateValue;
            let handle = self.slot.try_update_value(Option::take).flatten();
            if let Some(handle) = handle {
                handle.shutdown();
            }
        }
    }
}

#[cfg(feature = "hydrate")]
mod driver {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use futures::channel::mpsc;
    use futures::future::{AbortHandle, Abortable, Either};
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::futures::WebSocket;
    use gloo_net::websocket::{Message, State, WebSocketError};
    use leptos::prelude::{GetUntracked, NodeRef, RwSignal, Set};
    use relay::{CameraSource, Delivery, Outbound, ReconnectPolicy, RelaySession};

    use super::RelaySnapshot;
    use crate::util::clock::now_ms;
    use crate::util::frame_render::{clear, present_jpeg};

    enum ConnectError {
        /// The socket could not be created or the handshake never completed.
        Open(String),
        /// The socket was created but failed or closed abnormally.
        Transport(String),
    }

    struct Shared {
        ws_url: String,
        session: RefCell<RelaySession>,
        canvas: NodeRef<leptos::html::Canvas>,
        snapshot: RwSignal<RelaySnapshot>,
        has_frame: Cell<bool>,
        abort: RefCell<Option<AbortHandle>>,
        outbound: RefCell<Option<mpsc::UnboundedSender<Vec<u8>>>>,
    }

    /// Control surface for one running relay. Cloning shares the driver.
    #[derive(Clone)]
    pub struct RelayHandle {
        inner: Rc<Shared>,
    }

    /// Start a relay for `source` that draws onto `canvas` and publishes its
    /// state into `snapshot`.
    pub fn spawn_relay(
        ws_url: String,
        source: CameraSource,
        policy: ReconnectPolicy,
        canvas: NodeRef<leptos::html::Canvas>,
        snapshot: RwSignal<RelaySnapshot>,
    ) -> RelayHandle {
        let inner = Rc::new(Shared {
            ws_url,
            session: RefCell::new(RelaySession::new(source, policy)),
            canvas,
            snapshot,
            has_frame: Cell::new(false),
            abort: RefCell::new(None),
            outbound: RefCell::new(None),
        });
        start(&inner);
        RelayHandle { inner }
    }

    impl RelayHandle {
        /// Offer a locally captured JPEG. Dropped unless the socket is open.
        pub fn send_frame(&self, bytes: Vec<u8>) -> Outbound {
            let verdict = self.inner.session.borrow_mut().offer_outbound(bytes.len(), now_ms_u64());
            if verdict == Outbound::Send {
                if let Some(tx) = self.inner.outbound.borrow().as_ref() {
                    let _ = tx.unbounded_send(bytes);
                }
            }
            publish(&self.inner);
            verdict
        }

        /// Send `test_frame` and time the next inbound frame. Reports a
        /// timeout on the status line when nothing arrives within 5 s.
        pub fn probe(&self, test_frame: Vec<u8>) -> bool {
            if !self.inner.session.borrow_mut().start_probe(now_ms_u64()) {
                return false;
            }
            self.send_frame(test_frame);
            let inner = Rc::clone(&self.inner);
            leptos::task::spawn_local(async move {
                let timeout = std::time::Duration::from_millis(relay::session::PROBE_TIMEOUT_MS);
                gloo_timers::future::sleep(timeout).await;
                if inner.session.borrow_mut().expire_probe(now_ms_u64()) {
                    leptos::logging::warn!("relay probe timed out");
                    publish(&inner);
                }
            });
            true
        }

        /// Drop the current connection and connect again immediately.
        pub fn reconnect(&self) {
            abort_current(&self.inner);
            if self.inner.session.borrow_mut().request_reconnect() {
                start(&self.inner);
            }
        }

        /// Drop the connection without scheduling a reconnect.
        pub fn disconnect(&self) {
            abort_current(&self.inner);
            self.inner.session.borrow_mut().disconnect();
            publish(&self.inner);
        }

        /// Change the reconnect schedule. Applies from the next close.
        pub fn set_policy(&self, policy: ReconnectPolicy) {
            self.inner.session.borrow_mut().set_policy(policy);
        }

        /// Save the last drawn frame as a download.
        ///
        /// # Errors
        ///
        /// Returns a message when nothing has been drawn yet or the browser
        /// refuses the export.
        pub fn snapshot(&self, camera_name: &str) -> Result<(), String> {
            if !self.inner.has_frame.get() {
                return Err("no frame to save yet".to_owned());
            }
            let canvas = self
                .inner
                .canvas
                .get_untracked()
                .ok_or_else(|| "camera view is not mounted".to_owned())?;
            crate::util::frame_render::download_snapshot(&canvas, camera_name)
        }

        /// View unmounted. Terminal: nothing reconnects afterwards.
        pub fn shutdown(&self) {
            abort_current(&self.inner);
            self.inner.session.borrow_mut().dispose();
            publish(&self.inner);
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_ms_u64() -> u64 {
        now_ms().max(0) as u64
    }

    fn publish(inner: &Shared) {
        let snapshot = RelaySnapshot::of(&inner.session.borrow(), inner.has_frame.get());
        // The owning view may already be gone.
        let _ = inner.snapshot.try_set(snapshot);
    }

    fn abort_current(inner: &Shared) {
        if let Some(handle) = inner.abort.borrow_mut().take() {
            handle.abort();
        }
        inner.outbound.replace(None);
    }

    fn start(inner: &Rc<Shared>) {
        abort_current(inner);
        let (handle, registration) = AbortHandle::new_pair();
        inner.abort.replace(Some(handle));
        let task = Abortable::new(run_loop(Rc::clone(inner)), registration);
        leptos::task::spawn_local(async move {
            let _ = task.await;
        });
    }

    /// Connect, run until the transport ends, then sleep on the reconnect
    /// ticket and go again while the session keeps honoring it.
    async fn run_loop(inner: Rc<Shared>) {
        loop {
            if !inner.session.borrow_mut().begin_connect() {
                publish(&inner);
                return;
            }
            if let Some(canvas) = inner.canvas.get_untracked() {
                clear(&canvas);
            }
            inner.has_frame.set(false);
            publish(&inner);

            let result = connect_and_run(&inner).await;
            inner.outbound.replace(None);
            let ticket = {
                let mut session = inner.session.borrow_mut();
                match result {
                    Ok(()) => session.on_close(),
                    Err(ConnectError::Open(error)) => {
                        leptos::logging::warn!("relay open failed: {error}");
                        session.connect_failed(error)
                    }
                    Err(ConnectError::Transport(error)) => {
                        leptos::logging::warn!("relay transport error: {error}");
                        session.on_error(error);
                        session.on_close()
                    }
                }
            };
            publish(&inner);

            let Some(ticket) = ticket else {
                return;
            };
            leptos::logging::log!("relay reconnecting in {}ms", ticket.delay.as_millis());
            gloo_timers::future::sleep(ticket.delay).await;
            if !inner.session.borrow_mut().reconnect_due(ticket) {
                return;
            }
        }
    }

    fn describe(error: WebSocketError) -> Result<(), ConnectError> {
        match error {
            WebSocketError::ConnectionClose(event) if event.was_clean => Ok(()),
            WebSocketError::ConnectionClose(event) => {
                let reason = if event.reason.is_empty() {
                    format!("connection closed ({})", event.code)
                } else {
                    format!("connection closed ({}): {}", event.code, event.reason)
                };
                Err(ConnectError::Transport(reason))
            }
            other => Err(ConnectError::Transport(other.to_string())),
        }
    }

    async fn connect_and_run(inner: &Rc<Shared>) -> Result<(), ConnectError> {
        let mut ws = WebSocket::open(&inner.ws_url).map_err(|e| ConnectError::Open(e.to_string()))?;

        // The unsplit sink stays pending until the handshake finishes or fails.
        if let Err(error) = futures::future::poll_fn(|cx| ws.poll_ready_unpin(cx)).await {
            return Err(ConnectError::Open(error.to_string()));
        }
        let ready_state = match ws.state() {
            State::Connecting => 0,
            State::Open => 1,
            State::Closing => 2,
            State::Closed => 3,
        };
        super::handshake_result(ready_state).map_err(ConnectError::Open)?;

        let config = inner.session.borrow_mut().on_open();
        let Some(config) = config else {
            return Ok(());
        };
        let text = config.to_json().map_err(|e| ConnectError::Transport(e.to_string()))?;
        if let Err(error) = ws.send(Message::Text(text)).await {
            return describe(error);
        }
        leptos::logging::log!("relay open: {}", inner.ws_url);
        publish(inner);

        let (tx, mut rx) = mpsc::unbounded::<Vec<u8>>();
        inner.outbound.replace(Some(tx));
        let (mut ws_write, mut ws_read) = ws.split();

        let send_task = async {
            while let Some(bytes) = rx.next().await {
                if ws_write.send(Message::Bytes(bytes)).await.is_err() {
                    break;
                }
            }
        };

        let recv_task = async {
            while let Some(msg) = ws_read.next().await {
                let delivery = match msg {
                    Ok(Message::Bytes(bytes)) => inner.session.borrow_mut().on_binary(bytes, now_ms_u64()),
                    Ok(Message::Text(text)) => inner.session.borrow_mut().on_text(&text, now_ms_u64()),
                    Err(error) => return describe(error),
                };
                deliver(inner, delivery);
            }
            Ok(())
        };

        match futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await {
            Either::Left(((), _)) => Ok(()),
            Either::Right((result, _)) => result,
        }
    }

    fn deliver(inner: &Rc<Shared>, delivery: Delivery) {
        match delivery {
            Delivery::Frame(bytes) => {
                publish(inner);
                present(inner, bytes);
            }
            Delivery::ServerError(message) => {
                leptos::logging::warn!("relay server error: {message}");
                publish(inner);
            }
            Delivery::Ignored => {}
        }
    }

    fn present(inner: &Rc<Shared>, bytes: Vec<u8>) {
        let Some(canvas) = inner.canvas.get_untracked() else {
            return;
        };
        let inner = Rc::clone(inner);
        leptos::task::spawn_local(async move {
            match present_jpeg(&canvas, &bytes).await {
                Ok(()) => {
                    inner.has_frame.set(true);
                    inner.session.borrow_mut().on_frame_presented();
                }
                Err(error) => {
                    leptos::logging::warn!("relay frame dropped: {error}");
                    inner.session.borrow_mut().on_decode_error(error.to_string());
                }
            }
            publish(&inner);
        });
    }
}
