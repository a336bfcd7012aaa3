//! Feed of the most recent detections, refreshed every five seconds.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::types::Record;
use crate::util::clock::{local_offset_minutes, time_of_day};
use crate::util::vehicle::{direction_label, type_icon, type_label};

#[cfg(feature = "hydrate")]
const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5);

#[component]
pub fn DetectionPanel() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let detections = RwSignal::new(Vec::<Record>::new());
    let loading = RwSignal::new(true);

    #[cfg(feature = "hydrate")]
    {
        let poll_alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let poll_alive_task = poll_alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                refresh(&config, detections, loading).await;
                gloo_timers::future::sleep(POLL_INTERVAL).await;
                if !poll_alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
            }
        });
        on_cleanup(move || poll_alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = config;

    view! {
        <section class="panel detection-panel">
            <div class="section-header">
                <h2>"Recent detections"</h2>
                <span class="live-dot" title="Refreshes every 5s"></span>
            </div>
            <Show when=move || loading.get() && detections.with(Vec::is_empty)>
                <div class="panel__empty"><span class="spinner"></span></div>
            </Show>
            <Show when=move || !loading.get() && detections.with(Vec::is_empty)>
                <div class="panel__empty">"No detections yet"</div>
            </Show>
            <ul class="detection-panel__list">
                <For
                    each=move || detections.get()
                    key=|record| record.id
                    children=move |record| view! { <DetectionRow record=record/> }
                />
            </ul>
        </section>
    }
}

#[cfg(feature = "hydrate")]
async fn refresh(config: &ClientConfig, detections: RwSignal<Vec<Record>>, loading: RwSignal<bool>) {
    use crate::net::types::RecordQuery;
    use crate::state::records::{RECENT_LIMIT, most_recent, placeholder_detections};
    use crate::util::clock::{now_input_value, now_ms};

    let offset = local_offset_minutes();
    let rows = match crate::net::api::list_records(config, &RecordQuery::default()).await {
        Ok(records) => most_recent(&records, RECENT_LIMIT, offset),
        Err(error) => {
            leptos::logging::warn!("detections unavailable: {error}");
            placeholder_detections(now_input_value(now_ms(), offset))
        }
    };
    let _ = detections.try_set(rows);
    let _ = loading.try_set(false);
}

#[component]
fn DetectionRow(record: Record) -> impl IntoView {
    let offset = local_offset_minutes();
    let kind = record.tipo_vehiculo.clone().unwrap_or_default();
    let direction = record.direccion.clone().unwrap_or_default();
    let arrow = if direction == "entrada" { "↓" } else { "↑" };
    let seen = record
        .seen_at()
        .map_or_else(|| "—".to_owned(), |s| time_of_day(s, offset));

    view! {
        <li class="detection-row">
            <span class="detection-row__icon">{type_icon(&kind)}</span>
            <div class="detection-row__body">
                <span class="detection-row__plate">{record.plate().unwrap_or("—").to_owned()}</span>
                <span class="detection-row__meta">{type_label(&kind).to_owned()}</span>
            </div>
            <span class="detection-row__direction">{arrow}" "{direction_label(&direction).to_owned()}</span>
            <span class="detection-row__time">{seen}</span>
        </li>
    }
}
