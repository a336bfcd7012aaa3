//! Headline number tile for the statistics page.

use leptos::prelude::*;

#[component]
pub fn StatsCard(
    title: &'static str,
    #[prop(into)] value: Signal<String>,
    icon: &'static str,
    #[prop(optional)] accent: Option<&'static str>,
) -> impl IntoView {
    let style = accent.map(|color| format!("border-left-color:{color}")).unwrap_or_default();
    view! {
        <div class="stats-card" style=style>
            <span class="stats-card__icon">{icon}</span>
            <div class="stats-card__body">
                <span class="stats-card__title">{title}</span>
                <span class="stats-card__value">{move || value.get()}</span>
            </div>
        </div>
    }
}
