//! Checkout dialog: quotes the stay and closes the invoice.
//!
//! ERROR HANDLING
//! ==============
//! A failed `PATCH` is logged and toasted, but the vehicle still leaves the
//! active list: the operator has already collected payment.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::types::Record;
use crate::state::ui::{ToastKind, UiState, notify};
use crate::util::billing;
use crate::util::clock::{local_offset_minutes, now_ms, time_of_day};
use crate::util::format::money;

#[component]
pub fn InvoiceModal(record: Record, on_close: Callback<()>, on_paid: Callback<i64>) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let ui = expect_context::<RwSignal<UiState>>();
    let paying = RwSignal::new(false);

    let offset = local_offset_minutes();
    let quote = billing::quote(&record, now_ms(), offset);
    let amount = quote.amount;
    let record_id = record.id;
    let plate = record.plate().unwrap_or("—").to_owned();
    let entered = record
        .hora_entrada
        .as_deref()
        .map_or_else(|| "—".to_owned(), |s| time_of_day(s, offset));

    let on_pay = move |_| {
        if paying.get_untracked() {
            return;
        }
        paying.set(true);
        let config = config.clone();
        leptos::task::spawn_local(async move {
            let exit_time = crate::util::clock::iso_utc(now_ms());
            match crate::net::api::close_invoice(&config, record_id, amount, exit_time).await {
                Ok(()) => notify(ui, ToastKind::Success, format!("Payment of {} recorded", money(amount))),
                Err(error) => {
                    leptos::logging::warn!("invoice close failed: {error}");
                    notify(ui, ToastKind::Error, error);
                }
            }
            on_paid.run(record_id);
            on_close.run(());
        });
    };
    let on_backdrop = move |_| on_close.run(());
    let on_cancel = move |_| on_close.run(());

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <div class="dialog dialog--invoice" on:click=move |ev| ev.stop_propagation()>
                <h2>"Check out"</h2>
                <div class="invoice__plate">{plate}</div>
                <dl class="invoice__summary">
                    <dt>"Entry"</dt>
                    <dd>{entered}</dd>
                    <dt>"Time parked"</dt>
                    <dd>{quote.time_label}</dd>
                    <dt>"Rate"</dt>
                    <dd>{format!("{} / hour", money(billing::HOURLY_RATE))}</dd>
                    <dt>"Total"</dt>
                    <dd class="invoice__total">{money(amount)}</dd>
                </dl>
                <div class="dialog__actions">
                    <button class="btn" on:click=on_cancel>"Cancel"</button>
                    <button class="btn btn--primary" on:click=on_pay disabled=move || paying.get()>
                        {move || if paying.get() { "Processing..." } else { "Confirm payment" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
