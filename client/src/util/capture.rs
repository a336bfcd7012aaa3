//! Local camera capture for `local` sources.
//!
//! Opens the viewer's camera with `getUserMedia`, plays it into a detached
//! `<video>`, and grabs JPEG stills through an offscreen canvas. Pacing and
//! sizing rules come from [`relay::capture`]; this module only does the
//! browser plumbing.

#[cfg(test)]
#[path = "capture_test.rs"]
mod capture_test;

#[cfg(any(test, feature = "hydrate"))]
use std::sync::Arc;
#[cfg(any(test, feature = "hydrate"))]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "hydrate")]
use relay::CaptureSettings;
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast as _;

#[cfg(feature = "hydrate")]
use crate::util::frame_render::js_error_message;

/// Interval of the capture tick; the pacer decides which ticks sample.
pub const TICK_MS: u32 = 16;

/// Lifetime flags shared by a view and its capture loop.
///
/// `alive` is cleared once, on unmount. `running` is held while a loop task
/// exists, so a retry can restart a loop that gave up (for example after
/// camera permission was denied) without starting a second one.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Clone, Debug)]
pub struct CaptureFlags {
    alive: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
}

#[cfg(any(test, feature = "hydrate"))]
impl CaptureFlags {
    #[must_use]
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Claim the loop slot. Returns `true` when the caller should spawn a
    /// loop: the view is alive and no loop is running.
    pub fn begin(&self) -> bool {
        self.is_alive()
            && self
                .running
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
    }

    /// The loop exited, normally or after a start failure.
    pub fn finish(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Unmount: every loop stops at its next tick and none restarts.
    pub fn stop(&self) {
        self.alive.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(any(test, feature = "hydrate"))]
impl Default for CaptureFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// A running local camera.
#[cfg(feature = "hydrate")]
pub struct LocalCapture {
    stream: web_sys::MediaStream,
    video: web_sys::HtmlVideoElement,
    canvas: web_sys::HtmlCanvasElement,
}

#[cfg(feature = "hydrate")]
impl LocalCapture {
    /// Ask for camera permission and start playback.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when permission is denied or no camera
    /// is available.
    pub async fn start() -> Result<Self, String> {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        let document = window.document().ok_or_else(|| "no document".to_owned())?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|_| "camera access is not supported by this browser".to_owned())?;

        let constraints = web_sys::MediaStreamConstraints::new();
        constraints.set_video(&wasm_bindgen::JsValue::TRUE);
        constraints.set_audio(&wasm_bindgen::JsValue::FALSE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| format!("camera unavailable: {}", js_error_message(&e)))?;
        let stream = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| format!("camera permission denied: {}", js_error_message(&e)))?
            .dyn_into::<web_sys::MediaStream>()
            .map_err(|_| "unexpected media stream type".to_owned())?;

        let video = document
            .create_element("video")
            .map_err(|e| js_error_message(&e))?
            .dyn_into::<web_sys::HtmlVideoElement>()
            .map_err(|_| "unexpected element type".to_owned())?;
        video.set_muted(true);
        let _ = video.set_attribute("playsinline", "");
        video.set_src_object(Some(&stream));
        if let Ok(play) = video.play() {
            let _ = wasm_bindgen_futures::JsFuture::from(play).await;
        }

        let canvas = document
            .create_element("canvas")
            .map_err(|e| js_error_message(&e))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| "unexpected element type".to_owned())?;

        Ok(Self { stream, video, canvas })
    }

    /// Grab the current video frame as JPEG bytes.
    ///
    /// # Errors
    ///
    /// Returns a message when the frame cannot be drawn or encoded.
    pub async fn grab_jpeg(&self, settings: &CaptureSettings) -> Result<Vec<u8>, String> {
        let source = Some((self.video.video_width(), self.video.video_height()));
        let (width, height) = settings.target_size(source, effective_network_type().as_deref());
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let ctx = self
            .canvas
            .get_context("2d")
            .map_err(|e| js_error_message(&e))?
            .ok_or_else(|| "canvas has no 2d context".to_owned())?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .map_err(|_| "unexpected canvas context type".to_owned())?;
        ctx.draw_image_with_html_video_element_and_dw_and_dh(
            &self.video,
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        )
        .map_err(|e| js_error_message(&e))?;

        let blob = canvas_to_jpeg_blob(&self.canvas, settings.quality).await?;
        let buffer = wasm_bindgen_futures::JsFuture::from(blob.array_buffer())
            .await
            .map_err(|e| js_error_message(&e))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }

    /// Stop every track so the camera light goes off.
    pub fn stop(&self) {
        let tracks = self.stream.get_tracks();
        for track in tracks.iter() {
            if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
    }
}

#[cfg(feature = "hydrate")]
async fn canvas_to_jpeg_blob(canvas: &web_sys::HtmlCanvasElement, quality: f64) -> Result<web_sys::Blob, String> {
    use futures::channel::oneshot;
    use wasm_bindgen::closure::Closure;

    let (tx, rx) = oneshot::channel::<Option<web_sys::Blob>>();
    let callback = Closure::once(move |blob: Option<web_sys::Blob>| {
        let _ = tx.send(blob);
    });
    canvas
        .to_blob_with_type_and_encoder_options(
            callback.as_ref().unchecked_ref(),
            "image/jpeg",
            &wasm_bindgen::JsValue::from_f64(quality),
        )
        .map_err(|e| js_error_message(&e))?;
    let blob = rx.await.map_err(|_| "encoder dropped the frame".to_owned())?;
    drop(callback);
    blob.ok_or_else(|| "encoder produced no data".to_owned())
}

/// A small "TEST" card encoded as JPEG, sent by the latency probe.
///
/// # Errors
///
/// Returns a message when the card cannot be drawn or encoded.
#[cfg(feature = "hydrate")]
pub async fn test_pattern_jpeg() -> Result<Vec<u8>, String> {
    let canvas = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_owned())?
        .create_element("canvas")
        .map_err(|e| js_error_message(&e))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| "unexpected element type".to_owned())?;
    canvas.set_width(160);
    canvas.set_height(120);
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| js_error_message(&e))?
        .ok_or_else(|| "canvas has no 2d context".to_owned())?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| "unexpected canvas context type".to_owned())?;
    ctx.set_fill_style_str("#333");
    ctx.fill_rect(0.0, 0.0, 160.0, 120.0);
    ctx.set_fill_style_str("#fff");
    ctx.set_font("16px sans-serif");
    ctx.fill_text("TEST", 40.0, 65.0).map_err(|e| js_error_message(&e))?;

    let blob = canvas_to_jpeg_blob(&canvas, relay::capture::JPEG_QUALITY).await?;
    let buffer = wasm_bindgen_futures::JsFuture::from(blob.array_buffer())
        .await
        .map_err(|e| js_error_message(&e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// `navigator.connection.effectiveType`, when the browser exposes it.
#[cfg(feature = "hydrate")]
pub fn effective_network_type() -> Option<String> {
    let navigator = web_sys::window()?.navigator();
    let connection = js_sys::Reflect::get(&navigator, &"connection".into()).ok()?;
    if connection.is_undefined() || connection.is_null() {
        return None;
    }
    js_sys::Reflect::get(&connection, &"effectiveType".into()).ok()?.as_string()
}
