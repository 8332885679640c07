//! Dashboard page: the authenticated placeholder.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server only renders this route for a live session. The page still
//! watches auth state so a session that ends while the tab is open sends the
//! visitor back to `/login`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::sign_out_button::SignOutButton;
use crate::components::theme_toggle::ThemeToggle;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

fn signed_in_as(label: &str) -> String {
    format!("Signed in as {label}")
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <div class="dashboard-header__titles">
                    <h1>"PolyLaunch Dashboard"</h1>
                    <Show
                        when=move || !auth.get().loading
                        fallback=|| view! { <p class="muted">"Loading session..."</p> }
                    >
                        <p class="muted">{move || signed_in_as(auth.get().label())}</p>
                    </Show>
                </div>
                <div class="dashboard-header__actions">
                    <ThemeToggle/>
                    <a href="/" class="button button--outline">"Home"</a>
                    <SignOutButton/>
                </div>
            </header>

            <section class="card">
                <h2 class="card__title">"Generate launch assets"</h2>
                <p class="card__subtitle">
                    "Upload a product photo and run launch-kit generation. This remains a placeholder flow."
                </p>
                <div class="field">
                    <label for="product-photo">"Product photo"</label>
                    <input id="product-photo" type="file" accept="image/*"/>
                </div>
                <button class="button button--primary" type="button" disabled=true>
                    "Generate launch kit"
                </button>
                <p class="muted muted--small">
                    "Next step: connect generation and localization outputs to your pipeline."
                </p>
            </section>
        </div>
    }
}
