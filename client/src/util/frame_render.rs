//! Drawing relay frames onto a canvas.
//!
//! Each JPEG goes bytes -> `Blob` -> object URL -> `<img>` -> `decode()` ->
//! `drawImage`. [`relay::present_frame`] holds the object URL in a
//! [`relay::ScopedRef`] so it is revoked when presentation finishes, whether
//! the decode succeeded or not, and when an aborted relay drops it mid-decode.
//! Presentations are independent tasks: a slow decode never blocks the next
//! frame, and whichever finishes last is what stays on screen.

#[cfg(test)]
#[path = "frame_render_test.rs"]
mod frame_render_test;

#[cfg(feature = "hydrate")]
use relay::{PresentError, RefRegistry, present_frame};
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast as _;

/// Download name for a canvas snapshot: `capture-entrada-principal-1705314600000.jpg`.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn snapshot_filename(camera_name: &str, now_ms: i64) -> String {
    let mut slug = String::with_capacity(camera_name.len());
    let mut last_dash = true;
    for ch in camera_name.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "camera" } else { slug };
    format!("capture-{slug}-{now_ms}.jpg")
}

#[cfg(feature = "hydrate")]
pub(crate) fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

/// Object URLs backed by `URL.createObjectURL`.
#[cfg(feature = "hydrate")]
pub struct BlobUrlRegistry;

#[cfg(feature = "hydrate")]
impl RefRegistry for BlobUrlRegistry {
    type Handle = String;

    fn create(&self, bytes: &[u8]) -> Result<String, String> {
        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::of1(&array);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/jpeg");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| js_error_message(&e))?;
        web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| js_error_message(&e))
    }

    fn release(&self, handle: &String) {
        let _ = web_sys::Url::revoke_object_url(handle);
    }
}

#[cfg(feature = "hydrate")]
fn context_2d(canvas: &web_sys::HtmlCanvasElement) -> Result<web_sys::CanvasRenderingContext2d, String> {
    canvas
        .get_context("2d")
        .map_err(|e| js_error_message(&e))?
        .ok_or_else(|| "canvas has no 2d context".to_owned())?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| "unexpected canvas context type".to_owned())
}

/// Decode `bytes` as JPEG and draw it scaled to fill `canvas`.
///
/// # Errors
///
/// [`PresentError::Create`] when no object URL could be made,
/// [`PresentError::Decode`] when the image does not decode or draw.
#[cfg(feature = "hydrate")]
pub async fn present_jpeg(canvas: &web_sys::HtmlCanvasElement, bytes: &[u8]) -> Result<(), PresentError> {
    present_frame(&BlobUrlRegistry, bytes, |url| async move { draw_url(canvas, &url).await }).await
}

#[cfg(feature = "hydrate")]
async fn draw_url(canvas: &web_sys::HtmlCanvasElement, url: &str) -> Result<(), String> {
    let image = web_sys::HtmlImageElement::new().map_err(|e| js_error_message(&e))?;
    image.set_src(url);
    wasm_bindgen_futures::JsFuture::from(image.decode())
        .await
        .map_err(|e| js_error_message(&e))?;

    let ctx = context_2d(canvas)?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        &image,
        0.0,
        0.0,
        f64::from(canvas.width()),
        f64::from(canvas.height()),
    )
    .map_err(|e| js_error_message(&e))
}

/// Paint the canvas black, used when a view (re)connects.
#[cfg(feature = "hydrate")]
pub fn clear(canvas: &web_sys::HtmlCanvasElement) {
    if let Ok(ctx) = context_2d(canvas) {
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
    }
}

/// Save the current canvas contents as a JPEG download.
///
/// # Errors
///
/// Returns a message when the canvas cannot be encoded or the download
/// link cannot be created.
#[cfg(feature = "hydrate")]
pub fn download_snapshot(canvas: &web_sys::HtmlCanvasElement, camera_name: &str) -> Result<(), String> {
    let data_url = canvas
        .to_data_url_with_type("image/jpeg")
        .map_err(|e| js_error_message(&e))?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_owned())?;
    let anchor = document
        .create_element("a")
        .map_err(|e| js_error_message(&e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "unexpected element type".to_owned())?;
    anchor.set_href(&data_url);
    anchor.set_download(&snapshot_filename(camera_name, crate::util::clock::now_ms()));
    anchor.click();
    Ok(())
}
