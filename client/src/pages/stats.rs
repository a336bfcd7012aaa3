//! Statistics page: headline numbers, per-type charts, recent activity.

use leptos::prelude::*;

use crate::components::charts::{BarChart, PieChart};
use crate::components::stats_card::StatsCard;
use crate::config::ClientConfig;
use crate::state::records::{RECENT_LIMIT, most_recent};
use crate::state::stats::{StatsState, chart_rows, daily_average, most_common};
use crate::util::clock::{date_time, local_offset_minutes};
use crate::util::vehicle::{direction_label, type_icon, type_label};

/// Records fetched for the activity list; the newest [`RECENT_LIMIT`] are shown.
const RECENT_FETCH: u32 = 100;

#[component]
pub fn StatsPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let state = RwSignal::new(StatsState {
        loading: true,
        ..StatsState::default()
    });
    let reload = RwSignal::new(0_u64);
    let offset = local_offset_minutes();

    Effect::new(move || {
        let _ = reload.get();
        state.update(|s| s.loading = true);
        let config = config.clone();
        leptos::task::spawn_local(async move {
            let stats = crate::net::api::fetch_stats(&config).await;
            let recent = crate::net::api::list_records(&config, &crate::net::types::RecordQuery::recent(RECENT_FETCH)).await;
            state.try_update(|s| {
                let mut failures = Vec::new();
                match stats {
                    Ok(stats) => s.stats = stats,
                    Err(error) => failures.push(error),
                }
                match recent {
                    Ok(records) => s.recent = most_recent(&records, RECENT_LIMIT, offset),
                    Err(error) => failures.push(error),
                }
                if failures.is_empty() {
                    s.error = None;
                } else {
                    leptos::logging::warn!("stats unavailable: {}", failures.join("; "));
                    s.error = Some("Some statistics could not be loaded".to_owned());
                }
                s.loading = false;
            });
        });
    });

    let rows = Signal::derive(move || state.with(|s| chart_rows(&s.stats)));
    let total = move || state.with(|s| s.stats.total_registros.to_string());
    let today = move || state.with(|s| s.stats.registros_hoy.to_string());
    let average = move || state.with(|s| daily_average(s.stats.total_registros).to_string());
    let busiest = move || rows.with(|r| most_common(r).unwrap_or("—").to_owned());

    view! {
        <div class="stats-page">
            <div class="section-header">
                <h2>"Statistics"</h2>
                <button class="btn btn--small" on:click=move |_| reload.update(|n| *n += 1)>"Refresh"</button>
            </div>
            {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="banner banner--warning">{e}</div> })}

            <div class="stats-page__cards">
                <StatsCard title="Total records" value=Signal::derive(total) icon="📊" accent="#3B82F6"/>
                <StatsCard title="Today" value=Signal::derive(today) icon="📅" accent="#10B981"/>
                <StatsCard title="Daily average" value=Signal::derive(average) icon="📈" accent="#F59E0B"/>
                <StatsCard title="Most common" value=Signal::derive(busiest) icon="🚗" accent="#EF4444"/>
            </div>

            <Show
                when=move || rows.with(|r| !r.is_empty())
                fallback=move || view! {
                    <div class="panel__empty">
                        {move || if state.with(|s| s.loading) { "Loading..." } else { "No vehicle data yet" }}
                    </div>
                }
            >
                <div class="stats-page__charts">
                    <section class="panel">
                        <h3>"Vehicles by type"</h3>
                        <BarChart rows=rows/>
                    </section>
                    <section class="panel">
                        <h3>"Share by type"</h3>
                        <PieChart rows=rows/>
                    </section>
                </div>
            </Show>

            <section class="panel">
                <h3>"Recent activity"</h3>
                <ul class="activity-list">
                    <For
                        each=move || state.with(|s| s.recent.clone())
                        key=|record| record.id
                        children=move |record| {
                            let kind = record.tipo_vehiculo.clone().unwrap_or_default();
                            let direction = record.direccion.clone().unwrap_or_default();
                            let seen = record.seen_at().map_or_else(|| "—".to_owned(), |s| date_time(s, offset));
                            view! {
                                <li class="activity-list__item">
                                    <span>{type_icon(&kind)}</span>
                                    <span class="table__mono">{record.plate().unwrap_or("—").to_owned()}</span>
                                    <span>{type_label(&kind).to_owned()}</span>
                                    <span>{direction_label(&direction).to_owned()}</span>
                                    <span class="activity-list__time">{seen}</span>
                                </li>
                            }
                        }
                    />
                </ul>
            </section>
        </div>
    }
}
