//! Native relay driver for `watch` and `push`.
//!
//! DESIGN
//! ======
//! The same `RelaySession` that backs the browser view decides what happens
//! on every transport event here. This module only owns the tokio side: the
//! socket, the reconnect sleep, and a `RelayJob` that consumes inbound
//! frames (`watch`) or produces outbound ones (`push`).

#[cfg(test)]
#[path = "stream_test.rs"]
mod stream_test;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use futures_util::{SinkExt, StreamExt};
use relay::{
    CameraSource, CapturePacer, Delivery, Outbound, ReconnectPolicy, ReconnectTicket, RelaySession, looks_like_jpeg,
};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::{CliContext, CliError, now_ms};

/// How often the connection loop polls the job for outbound frames.
const TICK: Duration = Duration::from_millis(16);

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Remote camera URL the relay should pull from.
    #[arg(long)]
    pub url: String,

    #[arg(long, default_value = "CLI Watch")]
    pub name: String,

    /// Output directory for `frame-NNNNNN.jpg` files.
    #[arg(long, default_value = "frames")]
    pub out: PathBuf,

    /// Stop after saving this many frames.
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Seconds to wait before reconnecting.
    #[arg(long, default_value_t = 3)]
    pub reconnect_secs: u64,

    /// Exit on the first close instead of reconnecting.
    #[arg(long, default_value_t = false)]
    pub once: bool,
}

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Directory of `.jpg`/`.jpeg` files, sent in name order.
    #[arg(long)]
    pub dir: PathBuf,

    #[arg(long, default_value = "CLI Push")]
    pub name: String,

    #[arg(long, default_value_t = relay::capture::DEFAULT_FPS)]
    pub fps: u32,

    /// Start over after the last file.
    #[arg(long = "loop", default_value_t = false)]
    pub looped: bool,

    #[arg(long, default_value_t = 3)]
    pub reconnect_secs: u64,
}

/// What a connection does besides following the session.
pub(crate) trait RelayJob {
    /// Handle one inbound JPEG.
    ///
    /// # Errors
    ///
    /// Returns an error that ends the command (e.g. the output is not writable).
    fn on_frame(&mut self, bytes: &[u8]) -> Result<(), CliError>;

    /// Next frame to send at `now_ms`, if one is due.
    fn poll_outbound(&mut self, now_ms: u64) -> Option<Vec<u8>>;

    /// No more work: disconnect and stop reconnecting.
    fn finished(&self) -> bool;
}

// =============================================================================
// WATCH
// =============================================================================

/// Writes inbound frames as numbered JPEG files.
pub(crate) struct FrameSink {
    dir: PathBuf,
    saved: u64,
    max: Option<u64>,
}

impl FrameSink {
    pub fn new(dir: PathBuf, max: Option<u64>) -> Self {
        Self { dir, saved: 0, max }
    }

    pub fn saved(&self) -> u64 {
        self.saved
    }
}

pub(crate) fn frame_filename(index: u64) -> String {
    format!("frame-{index:06}.jpg")
}

impl RelayJob for FrameSink {
    fn on_frame(&mut self, bytes: &[u8]) -> Result<(), CliError> {
        let path = self.dir.join(frame_filename(self.saved + 1));
        std::fs::write(&path, bytes).map_err(|source| CliError::Io { path, source })?;
        self.saved += 1;
        Ok(())
    }

    fn poll_outbound(&mut self, _now_ms: u64) -> Option<Vec<u8>> {
        None
    }

    fn finished(&self) -> bool {
        self.max.is_some_and(|max| self.saved >= max)
    }
}

pub async fn run_watch(ctx: &CliContext, args: WatchArgs) -> Result<(), CliError> {
    std::fs::create_dir_all(&args.out).map_err(|source| CliError::Io {
        path: args.out.clone(),
        source,
    })?;
    let source = CameraSource::remote(args.url, args.name);
    let policy = ReconnectPolicy {
        enabled: !args.once,
        ..ReconnectPolicy::fixed(Duration::from_secs(args.reconnect_secs))
    };
    let mut sink = FrameSink::new(args.out.clone(), args.max_frames);

    let session = drive(&ctx.ws_url, source, policy, &mut sink).await?;
    eprintln!(
        "watch complete: saved={} received={} dir={}",
        sink.saved(),
        session.stats().frames_received,
        args.out.display()
    );
    Ok(())
}

// =============================================================================
// PUSH
// =============================================================================

/// Replays JPEG files at a fixed rate.
pub(crate) struct FrameSource {
    frames: Vec<Vec<u8>>,
    next: usize,
    looped: bool,
    pacer: CapturePacer,
    start_ms: Option<u64>,
}

impl FrameSource {
    pub fn new(frames: Vec<Vec<u8>>, fps: u32, looped: bool) -> Self {
        Self {
            frames,
            next: 0,
            looped,
            pacer: CapturePacer::new(fps),
            start_ms: None,
        }
    }
}

impl RelayJob for FrameSource {
    fn on_frame(&mut self, _bytes: &[u8]) -> Result<(), CliError> {
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn poll_outbound(&mut self, now_ms: u64) -> Option<Vec<u8>> {
        if self.finished() {
            return None;
        }
        let start = *self.start_ms.get_or_insert(now_ms);
        if !self.pacer.should_capture(now_ms.saturating_sub(start) as f64) {
            return None;
        }
        let frame = self.frames.get(self.next)?.clone();
        self.next += 1;
        if self.looped && self.next >= self.frames.len() {
            self.next = 0;
        }
        Some(frame)
    }

    fn finished(&self) -> bool {
        !self.looped && self.next >= self.frames.len()
    }
}

/// JPEG files in `dir`, sorted by name.
pub(crate) fn list_jpegs(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let entries = std::fs::read_dir(dir).map_err(|source| CliError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

pub async fn run_push(ctx: &CliContext, args: PushArgs) -> Result<(), CliError> {
    let mut frames = Vec::new();
    for path in list_jpegs(&args.dir)? {
        let bytes = std::fs::read(&path).map_err(|source| CliError::Io { path: path.clone(), source })?;
        if looks_like_jpeg(&bytes) {
            frames.push(bytes);
        } else {
            eprintln!("skipping {}: not a JPEG", path.display());
        }
    }
    if frames.is_empty() {
        return Err(CliError::NoFrames(args.dir));
    }
    eprintln!("pushing {} frames at {} fps", frames.len(), args.fps);

    let source = CameraSource::local(args.name);
    let policy = ReconnectPolicy::fixed(Duration::from_secs(args.reconnect_secs));
    let mut job = FrameSource::new(frames, args.fps, args.looped);

    let session = drive(&ctx.ws_url, source, policy, &mut job).await?;
    let stats = session.stats();
    eprintln!(
        "push complete: sent={} dropped={} attempts={}",
        stats.frames_sent, stats.frames_dropped, stats.connect_attempts
    );
    Ok(())
}

// =============================================================================
// DRIVER
// =============================================================================

/// Connect, run, and reconnect until the job finishes or the session stops
/// scheduling reconnects. Returns the final session for reporting.
async fn drive(
    ws_url: &str,
    source: CameraSource,
    policy: ReconnectPolicy,
    job: &mut impl RelayJob,
) -> Result<RelaySession, CliError> {
    let mut session = RelaySession::new(source, policy);

    while session.begin_connect() {
        eprintln!("connecting to {ws_url}");
        let ticket = match connect_async(ws_url).await {
            Ok((socket, _)) => run_connection(&mut session, socket, job).await?,
            Err(error) => session.connect_failed(error.to_string()),
        };
        if job.finished() {
            break;
        }
        let Some(ticket) = ticket else {
            eprintln!("{}; not reconnecting", session.status());
            break;
        };
        eprintln!("{}; reconnecting in {}s", session.status(), ticket.delay.as_secs());
        tokio::time::sleep(ticket.delay).await;
        if !session.reconnect_due(ticket) {
            break;
        }
    }

    session.dispose();
    Ok(session)
}

type Socket = tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn run_connection(
    session: &mut RelaySession,
    socket: Socket,
    job: &mut impl RelayJob,
) -> Result<Option<ReconnectTicket>, CliError> {
    let (mut sink, mut stream) = socket.split();

    let Some(config) = session.on_open() else {
        return Ok(None);
    };
    let config = config.to_json()?;
    if let Err(error) = sink.send(Message::Text(config.into())).await {
        session.on_error(error.to_string());
        return Ok(session.on_close());
    }
    eprintln!("{}", session.status());

    let mut ticker = tokio::time::interval(TICK);
    loop {
        tokio::select! {
            message = stream.next() => {
                let delivery = match message {
                    None | Some(Ok(Message::Close(_))) => break,
                    Some(Err(error)) => {
                        session.on_error(error.to_string());
                        break;
                    }
                    Some(Ok(Message::Binary(bytes))) => session.on_binary(bytes.to_vec(), now_ms()),
                    Some(Ok(Message::Text(text))) => session.on_text(text.as_str(), now_ms()),
                    Some(Ok(_)) => Delivery::Ignored,
                };
                match delivery {
                    Delivery::Frame(bytes) if looks_like_jpeg(&bytes) => {
                        job.on_frame(&bytes)?;
                        session.on_frame_presented();
                    }
                    Delivery::Frame(_) => session.on_decode_error("payload is not a JPEG"),
                    Delivery::ServerError(message) => eprintln!("server error: {message}"),
                    Delivery::Ignored => {}
                }
            }
            _ = ticker.tick() => {
                let now = now_ms();
                if let Some(frame) = job.poll_outbound(now) {
                    if session.offer_outbound(frame.len(), now) == Outbound::Send {
                        if let Err(error) = sink.send(Message::Binary(frame.into())).await {
                            session.on_error(error.to_string());
                            break;
                        }
                    }
                }
            }
        }

        if job.finished() {
            session.disconnect();
            let _ = sink.close().await;
            return Ok(None);
        }
    }

    Ok(session.on_close())
}
