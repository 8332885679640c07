//! Login page: a single "Continue with Google" action.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::components::theme_toggle::ThemeToggle;

/// Provider id sent to the sign-in endpoint.
pub const GOOGLE_PROVIDER: &str = "google";
/// Where a successful sign-in lands.
pub const SIGN_IN_CALLBACK: &str = "/dashboard";

fn sign_in_button_label(busy: bool) -> &'static str {
    if busy { "Redirecting..." } else { "Continue with Google" }
}

fn sign_in_button_class(busy: bool) -> &'static str {
    if busy {
        "button button--primary button--disabled login-card__google"
    } else {
        "button button--primary login-card__google"
    }
}

/// Non-script fallback for the sign-in button.
fn sign_in_fallback_href() -> String {
    format!("/api/auth/sign-in/{GOOGLE_PROVIDER}?callbackURL={SIGN_IN_CALLBACK}")
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let busy = RwSignal::new(false);

    let on_google = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::sign_in_social(GOOGLE_PROVIDER, SIGN_IN_CALLBACK).await {
                Ok(url) => crate::util::auth::assign_location(&url),
                Err(e) => log::warn!("google sign-in failed: {e}"),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="page-corner">
                <ThemeToggle/>
            </div>
            <div class="card login-card">
                <h1 class="card__title">"Sign in"</h1>
                <p class="card__subtitle">"Use Google to continue."</p>
                <a
                    href=sign_in_fallback_href()
                    class=move || sign_in_button_class(busy.get())
                    aria-disabled=move || busy.get().to_string()
                    on:click=on_google
                >
                    {move || sign_in_button_label(busy.get())}
                </a>
                <a href="/" class="link login-card__back">"Back to home"</a>
            </div>
        </div>
    }
}
