//! REST helpers for the parking backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each bounded by a
//! 30 s timeout and tagged with the `ngrok-skip-browser-warning` header the
//! public tunnels require.
//! Server-side (SSR): stubs returning an error, since these endpoints are
//! only called from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result<_, String>` with a short
//! `"<operation> failed: <status>"` message. Callers surface it as a toast
//! or banner and fall back to placeholder data where a screen would
//! otherwise be empty.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{Camera, NewCamera, Record, RecordDraft, RecordQuery, Stats};
#[cfg(feature = "hydrate")]
use super::types::{CloseInvoiceRequest, CreateCameraResponse, DetectionResult, ListEnvelope};
use crate::config::ClientConfig;

#[cfg(feature = "hydrate")]
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
#[cfg(feature = "hydrate")]
const NGROK_HEADER: &str = "ngrok-skip-browser-warning";

#[cfg(any(test, feature = "hydrate"))]
fn camera_endpoint(id: i64) -> String {
    format!("/camaras/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn record_endpoint(id: i64) -> String {
    format!("/registros/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn close_invoice_endpoint(record_id: i64) -> String {
    format!("/facturas/{record_id}/cerrar")
}

#[cfg(any(test, feature = "hydrate"))]
fn records_endpoint(query: &RecordQuery) -> String {
    format!("/registros{}", query.to_query_string())
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(operation: &str, status: u16) -> String {
    format!("{operation} failed: {status}")
}

#[cfg(feature = "hydrate")]
async fn with_timeout<F: std::future::Future>(fut: F) -> Result<F::Output, String> {
    use futures::future::{Either, select};

    let timeout = gloo_timers::future::sleep(REQUEST_TIMEOUT);
    match select(Box::pin(fut), Box::pin(timeout)).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err("request timed out".to_owned()),
    }
}

#[cfg(feature = "hydrate")]
async fn send_checked(
    operation: &str,
    pending: impl std::future::Future<Output = Result<gloo_net::http::Response, gloo_net::Error>>,
) -> Result<gloo_net::http::Response, String> {
    let resp = with_timeout(pending).await?.map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(request_failed_message(operation, resp.status()));
    }
    Ok(resp)
}

#[cfg(feature = "hydrate")]
fn get(config: &ClientConfig, path: &str) -> gloo_net::http::RequestBuilder {
    gloo_net::http::Request::get(&config.endpoint(path)).header(NGROK_HEADER, "true")
}

#[cfg(feature = "hydrate")]
fn post(config: &ClientConfig, path: &str) -> gloo_net::http::RequestBuilder {
    gloo_net::http::Request::post(&config.endpoint(path)).header(NGROK_HEADER, "true")
}

#[cfg(feature = "hydrate")]
fn put(config: &ClientConfig, path: &str) -> gloo_net::http::RequestBuilder {
    gloo_net::http::Request::put(&config.endpoint(path)).header(NGROK_HEADER, "true")
}

#[cfg(feature = "hydrate")]
fn patch(config: &ClientConfig, path: &str) -> gloo_net::http::RequestBuilder {
    gloo_net::http::Request::patch(&config.endpoint(path)).header(NGROK_HEADER, "true")
}

#[cfg(feature = "hydrate")]
fn delete(config: &ClientConfig, path: &str) -> gloo_net::http::RequestBuilder {
    gloo_net::http::Request::delete(&config.endpoint(path)).header(NGROK_HEADER, "true")
}

/// `GET /camaras`. Accepts a bare array or `{ "camaras": [...] }`.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
pub async fn list_cameras(config: &ClientConfig) -> Result<Vec<Camera>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send_checked("camera list", get(config, "/camaras").send()).await?;
        let body: ListEnvelope<Camera> = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.into_items())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
        Err("not available on server".to_owned())
    }
}

/// `POST /camaras`. Returns the server-assigned id when the response has one.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
pub async fn create_camera(config: &ClientConfig, camera: &NewCamera) -> Result<Option<i64>, String> {
    #[cfg(feature = "hydrate")]
    {
        let request = post(config, "/camaras").json(camera).map_err(|e| e.to_string())?;
        let resp = send_checked("camera create", request.send()).await?;
        let body: CreateCameraResponse = resp.json().await.unwrap_or_default();
        Ok(body.server_id())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, camera);
        Err("not available on server".to_owned())
    }
}

/// `DELETE /camaras/{id}`.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
pub async fn delete_camera(config: &ClientConfig, id: i64) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        send_checked("camera delete", delete(config, &camera_endpoint(id)).send()).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, id);
        Err("not available on server".to_owned())
    }
}

/// `GET /registros` with optional filters.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
pub async fn list_records(config: &ClientConfig, query: &RecordQuery) -> Result<Vec<Record>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send_checked("record list", get(config, &records_endpoint(query)).send()).await?;
        let body: ListEnvelope<Record> = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.into_items())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, query);
        Err("not available on server".to_owned())
    }
}

/// `GET /registros/{id}`.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
pub async fn get_record(config: &ClientConfig, id: i64) -> Result<Record, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send_checked("record fetch", get(config, &record_endpoint(id)).send()).await?;
        resp.json().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, id);
        Err("not available on server".to_owned())
    }
}

/// `POST /registros`.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
pub async fn create_record(config: &ClientConfig, draft: &RecordDraft) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let request = post(config, "/registros").json(draft).map_err(|e| e.to_string())?;
        send_checked("record create", request.send()).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, draft);
        Err("not available on server".to_owned())
    }
}

/// `PUT /registros/{id}`.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
pub async fn update_record(config: &ClientConfig, id: i64, draft: &RecordDraft) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let request = put(config, &record_endpoint(id)).json(draft).map_err(|e| e.to_string())?;
        send_checked("record update", request.send()).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, id, draft);
        Err("not available on server".to_owned())
    }
}

/// `DELETE /registros/{id}`.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
pub async fn delete_record(config: &ClientConfig, id: i64) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        send_checked("record delete", delete(config, &record_endpoint(id)).send()).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, id);
        Err("not available on server".to_owned())
    }
}

/// `PATCH /facturas/{id}/cerrar` with the amount paid and exit time.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
pub async fn close_invoice(config: &ClientConfig, record_id: i64, amount: f64, exit_time: String) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = CloseInvoiceRequest {
            valor_pagado: amount,
            hora_salida: exit_time,
        };
        let request = patch(config, &close_invoice_endpoint(record_id))
            .json(&body)
            .map_err(|e| e.to_string())?;
        send_checked("invoice close", request.send()).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, record_id, amount, exit_time);
        Err("not available on server".to_owned())
    }
}

/// `GET /stats`.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
pub async fn fetch_stats(config: &ClientConfig) -> Result<Stats, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send_checked("stats", get(config, "/stats").send()).await?;
        resp.json().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
        Err("not available on server".to_owned())
    }
}

/// `POST /detect` with the image as multipart field `file`.
///
/// # Errors
///
/// Returns an error string on transport failure or non-2xx status.
#[cfg(feature = "hydrate")]
pub async fn detect_vehicle(config: &ClientConfig, file: &web_sys::File) -> Result<DetectionResult, String> {
    let form = web_sys::FormData::new().map_err(|e| crate::util::frame_render::js_error_message(&e))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| crate::util::frame_render::js_error_message(&e))?;
    let request = post(config, "/detect").body(form).map_err(|e| e.to_string())?;
    let resp = send_checked("detection", request.send()).await?;
    resp.json().await.map_err(|e| e.to_string())
}
