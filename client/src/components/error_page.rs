//! Full-page fallback shown when a route fails to render.
//!
//! Backend failures never reach here: pages fall back to placeholder data
//! with a banner. What does reach the boundary is a route that cannot
//! render at all, such as an unknown path. WASM panics abort the instance
//! and are reported by the panic hook instead.

#[cfg(test)]
#[path = "error_page_test.rs"]
mod error_page_test;

use leptos::prelude::*;

/// Failures a route raises into the app's error boundary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("no page at {0}")]
    NotFound(String),
}

/// Routes fallback: raises [`AppError::NotFound`] for the current path.
#[component]
pub fn NotFound() -> impl IntoView {
    let location = leptos_router::hooks::use_location();
    move || Err::<(), _>(AppError::NotFound(location.pathname.get()))
}

/// Recoverable error screen with reload and go-home actions.
#[component]
pub fn ErrorScreen(errors: ArcRwSignal<Errors>) -> impl IntoView {
    let messages = move || {
        errors
            .get()
            .into_iter()
            .map(|(_, error)| error.to_string())
            .collect::<Vec<_>>()
    };

    let on_reload = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        }
    };
    let on_home = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/");
            }
        }
    };

    view! {
        <div class="error-screen">
            <h1>"Something went wrong"</h1>
            <p>"The dashboard hit an unexpected error. Reload the page or go back to the dashboard."</p>
            <div class="error-screen__actions">
                <button class="btn btn--primary" on:click=on_reload>"Reload"</button>
                <button class="btn" on:click=on_home>"Home"</button>
            </div>
            <details class="error-screen__details">
                <summary>"Details"</summary>
                <ul>
                    {move || messages().into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
                </ul>
            </details>
        </div>
    }
}
