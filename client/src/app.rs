//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos::server::SharedValue;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{dashboard::DashboardPage, landing::LandingPage, login::LoginPage};
use crate::state::auth::{AuthState, ServerSession};
use crate::state::ui::UiState;
use crate::util::auth::load_session;
use crate::util::theme::{self, BrowserHost};

/// Class the shell puts on `<html>` before any preference is known.
pub const SHELL_HTML_CLASS: &str = theme::DARK_CLASS;

/// HTML shell rendered on the server for SSR + hydration.
///
/// The document starts dark; the stored preference is applied once the
/// client hydrates.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en" class=SHELL_HTML_CLASS>
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
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
/// Owns the UI and auth state, provides both as contexts, and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // A session the server already resolved is rendered straight away and
    // handed to the client with the hydration data.
    let seeded = SharedValue::new(|| use_context::<ServerSession>().map(|s| s.0)).into_inner();
    let known = seeded.is_some();

    let ui = RwSignal::new(UiState::default());
    let auth = RwSignal::new(AuthState::seeded(seeded));
    provide_context(ui);
    provide_context(auth);

    // Effects only run in the browser, after hydration.
    Effect::new(move || {
        let initial = theme::initial_theme(&BrowserHost);
        theme::apply(&BrowserHost, initial);
        ui.update(|u| u.theme = initial);
    });
    if !known {
        load_session(auth);
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/polylaunch.css"/>
        <Title text="PolyLaunch"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
            </Routes>
        </Router>
    }
}
