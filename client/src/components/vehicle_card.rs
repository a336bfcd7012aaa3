//! Card for one parked vehicle in the active vehicles panel.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::net::types::Record;
use crate::util::billing;
use crate::util::clock::{local_offset_minutes, minutes_since, now_ms, time_of_day};
use crate::util::format::{elapsed_label, money};
use crate::util::vehicle::{type_icon, type_label};

#[component]
pub fn VehicleCard(record: Record, on_finish: Callback<Record>) -> impl IntoView {
    let offset = local_offset_minutes();
    let now = now_ms();

    let plate = record.plate().unwrap_or("—").to_owned();
    let kind = record.tipo_vehiculo.clone().unwrap_or_default();
    let icon = type_icon(&kind);
    let label = type_label(&kind).to_owned();
    let entered = record
        .hora_entrada
        .as_deref()
        .map_or_else(|| "—".to_owned(), |s| time_of_day(s, offset));
    let elapsed = record
        .hora_entrada
        .as_deref()
        .and_then(|s| minutes_since(s, now, offset))
        .map_or_else(|| "—".to_owned(), elapsed_label);
    let quote = billing::quote(&record, now, offset);
    let amount = money(quote.amount);
    let image = record.url_imagen.clone();

    let on_click = move |_| on_finish.run(record.clone());

    view! {
        <div class="vehicle-card">
            <div class="vehicle-card__image">
                {match image {
                    Some(src) => view! { <img src=src alt="Vehicle"/> }.into_any(),
                    None => view! { <span class="vehicle-card__icon">{icon}</span> }.into_any(),
                }}
            </div>
            <div class="vehicle-card__body">
                <div class="vehicle-card__plate">{plate}</div>
                <div class="vehicle-card__meta">{label}" · in "{entered}</div>
                <div class="vehicle-card__meta">{elapsed}" · "{amount}</div>
            </div>
            <button class="btn btn--primary btn--small" on:click=on_click>"Check out"</button>
        </div>
    }
}
