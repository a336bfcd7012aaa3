//! Live dashboard: camera grid, detections, and the parking desk.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the landing route. It renders the shared camera store, polls the
//! active-vehicle list every 30 seconds, and owns the checkout flow from
//! vehicle card to invoice modal to invoice history refresh.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use relay::Camera;

use crate::components::camera_grid::CameraGrid;
use crate::components::camera_viewer::CameraViewer;
use crate::components::detection_panel::DetectionPanel;
use crate::components::invoice_history::InvoiceHistory;
use crate::components::invoice_modal::InvoiceModal;
use crate::components::vehicle_card::VehicleCard;
use crate::config::ClientConfig;
use crate::net::types::Record;
use crate::state::cameras::{CameraStore, needs_server_sync};
use crate::state::ui::{ToastKind, UiState, notify};
use crate::state::vehicles::ActiveVehicles;

#[cfg(feature = "hydrate")]
const VEHICLE_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(30);

/// Entry timestamps for the placeholder vehicles: two hours and 45 minutes
/// before `now_ms`.
#[cfg(any(test, feature = "hydrate"))]
fn placeholder_entry_times(now_ms: i64, offset_minutes: i64) -> (String, String) {
    use crate::util::clock::now_input_value;
    let (older, newer) = (120, 45);
    (
        now_input_value(now_ms - older * 60_000, offset_minutes),
        now_input_value(now_ms - newer * 60_000, offset_minutes),
    )
}

/// Dashboard page.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let cameras = expect_context::<RwSignal<CameraStore>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let vehicles = RwSignal::new(ActiveVehicles {
        loading: true,
        ..ActiveVehicles::default()
    });
    let viewing = RwSignal::new(None::<Camera>);
    let checkout = RwSignal::new(None::<Record>);
    let history_refresh = RwSignal::new(0_u64);

    #[cfg(feature = "hydrate")]
    {
        let poll_alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let poll_alive_task = poll_alive.clone();
        let config_poll = config.clone();
        leptos::task::spawn_local(async move {
            loop {
                load_active_vehicles(&config_poll, vehicles).await;
                gloo_timers::future::sleep(VEHICLE_POLL_INTERVAL).await;
                if !poll_alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
            }
        });
        on_cleanup(move || poll_alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let on_view = Callback::new(move |camera: Camera| viewing.set(Some(camera)));
    let on_close_viewer = Callback::new(move |()| viewing.set(None));

    let config_delete = config.clone();
    let on_delete = Callback::new(move |id: i64| {
        let Some(camera) = cameras.try_update(|s| s.remove(id)).flatten() else {
            return;
        };
        if viewing.with_untracked(|v| v.as_ref().is_some_and(|c| c.id == id)) {
            viewing.set(None);
        }
        notify(ui, ToastKind::Info, format!("Camera \"{}\" removed", camera.name));
        if !needs_server_sync(&camera) {
            return;
        }
        let config = config_delete.clone();
        leptos::task::spawn_local(async move {
            if let Err(error) = crate::net::api::delete_camera(&config, camera.id).await {
                leptos::logging::warn!("camera delete failed: {error}");
                cameras.try_update(|s| s.sync_failed(error.clone()));
                notify(ui, ToastKind::Error, error);
            }
        });
    });

    let on_finish = Callback::new(move |record: Record| checkout.set(Some(record)));
    let on_close_checkout = Callback::new(move |()| checkout.set(None));
    let on_paid = Callback::new(move |id: i64| {
        vehicles.update(|v| {
            v.remove(id);
        });
        history_refresh.update(|n| *n += 1);
    });

    let visible = move || {
        let search = ui.with(|u| u.search.clone());
        vehicles.with(|v| v.matching(&search))
    };
    let vehicle_count = move || vehicles.with(|v| v.items.len());

    view! {
        <div class="dashboard-page">
            <div class="dashboard-page__top">
                <CameraGrid on_view=on_view on_delete=on_delete/>
                <DetectionPanel/>
            </div>

            <section class="panel active-vehicles">
                <div class="section-header">
                    <h2>"Parked vehicles"</h2>
                    <span class="badge">{vehicle_count}</span>
                </div>
                {move || vehicles.with(|v| v.error.clone()).map(|e| view! { <div class="banner banner--warning">{e}</div> })}
                <Show when=move || vehicles.with(|v| v.loading && v.items.is_empty())>
                    <div class="panel__empty"><span class="spinner"></span></div>
                </Show>
                <Show when=move || vehicles.with(|v| !v.loading) && visible().is_empty()>
                    <div class="panel__empty">"No vehicles match"</div>
                </Show>
                <div class="active-vehicles__grid">
                    <For
                        each=visible
                        key=|record| record.id
                        children=move |record| view! { <VehicleCard record=record on_finish=on_finish/> }
                    />
                </div>
            </section>

            <InvoiceHistory refresh=history_refresh/>

            {move || checkout.get().map(|record| view! {
                <InvoiceModal record=record on_close=on_close_checkout on_paid=on_paid/>
            })}
            {move || viewing.get().map(|camera| view! {
                <CameraViewer camera=camera on_close=on_close_viewer/>
            })}
        </div>
    }
}

#[cfg(feature = "hydrate")]
async fn load_active_vehicles(config: &ClientConfig, vehicles: RwSignal<ActiveVehicles>) {
    use crate::net::types::RecordQuery;
    use crate::state::vehicles::placeholder_vehicles;
    use crate::util::clock::{local_offset_minutes, now_ms};

    match crate::net::api::list_records(config, &RecordQuery::active()).await {
        Ok(items) => {
            vehicles.try_update(|v| {
                v.items = items;
                v.error = None;
                v.loading = false;
            });
        }
        Err(error) => {
            leptos::logging::warn!("active vehicles unavailable: {error}");
            let (older, newer) = placeholder_entry_times(now_ms(), local_offset_minutes());
            vehicles.try_update(|v| {
                v.items = placeholder_vehicles(older, newer);
                v.error = Some("Could not reach the server; showing sample vehicles".to_owned());
                v.loading = false;
            });
        }
    }
}
