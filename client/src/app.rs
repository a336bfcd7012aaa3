//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use relay::NewCamera;

use crate::components::error_page::{ErrorScreen, NotFound};
use crate::components::navbar::Navbar;
use crate::components::toast_stack::ToastStack;
use crate::config::{API_META_NAME, ClientConfig, WS_META_NAME};
use crate::pages::{
    dashboard::DashboardPage, detect::DetectPage, records::RecordsPage, stats::StatsPage, stream::StreamPage,
};
use crate::state::cameras::CameraStore;
use crate::state::ui::{ToastKind, UiState, notify};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let config = ClientConfig::current();
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=API_META_NAME content=config.api_base_url/>
                <meta name=WS_META_NAME content=config.ws_url/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the backend config, the camera store and UI state, loads the
/// camera list once, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::current();
    let cameras = RwSignal::new(CameraStore::default());
    let ui = RwSignal::new(UiState::default());

    provide_context(config.clone());
    provide_context(cameras);
    provide_context(ui);

    #[cfg(feature = "hydrate")]
    {
        let theme = crate::util::theme::load();
        crate::util::theme::apply(theme);
        ui.update(|u| u.theme = theme);

        let config_load = config.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::list_cameras(&config_load).await {
                Ok(list) => {
                    leptos::logging::log!("loaded {} cameras", list.len());
                    cameras.try_update(|s| s.replace_all(list));
                }
                Err(error) => {
                    leptos::logging::warn!("camera list unavailable: {error}");
                    cameras.try_update(|s| s.load_failed(error));
                    notify(ui, ToastKind::Error, "Could not load cameras; showing sample cameras");
                }
            }
        });
    }

    let on_add_camera = Callback::new(move |camera: NewCamera| {
        let Some(provisional) = cameras.try_update(|s| s.add_optimistic(camera.clone())) else {
            return;
        };
        notify(ui, ToastKind::Success, format!("Camera \"{}\" added", camera.name));
        if camera.kind.is_local() {
            return;
        }
        let config = config.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::create_camera(&config, &camera).await {
                Ok(Some(server_id)) => {
                    cameras.try_update(|s| s.confirm(provisional, server_id));
                }
                Ok(None) => leptos::logging::warn!("camera create returned no id"),
                Err(error) => {
                    leptos::logging::warn!("camera create failed: {error}");
                    cameras.try_update(|s| s.sync_failed(error.clone()));
                    notify(ui, ToastKind::Error, error);
                }
            }
        });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/smartparking.css"/>
        <Title text="SmartParking"/>

        <Router>
            <Navbar on_add_camera=on_add_camera/>
            <main class="app-main">
                <ErrorBoundary fallback=|errors| view! { <ErrorScreen errors=errors/> }>
                    <Routes fallback=|| view! { <NotFound/> }>
                        <Route path=StaticSegment("") view=DashboardPage/>
                        <Route path=StaticSegment("stream") view=StreamPage/>
                        <Route path=StaticSegment("records") view=RecordsPage/>
                        <Route path=StaticSegment("stats") view=StatsPage/>
                        <Route path=StaticSegment("detect") view=DetectPage/>
                    </Routes>
                </ErrorBoundary>
            </main>
        </Router>
        <ToastStack/>
    }
}
