//! Sign-out button for authenticated pages.

#[cfg(test)]
#[path = "sign_out_button_test.rs"]
mod sign_out_button_test;

use leptos::prelude::*;

/// Where the browser lands after signing out.
pub const AFTER_SIGN_OUT: &str = "/";

/// Page to leave for once the sign-out request settles; `None` stays put.
///
/// Auth state is left alone on success: clearing it would wake the
/// dashboard's `/login` redirect and race the navigation away.
fn next_location<E>(result: &Result<(), E>) -> Option<&'static str> {
    result.is_ok().then_some(AFTER_SIGN_OUT)
}

/// Ends the session and leaves for the landing page on success.
///
/// A failed request leaves the user signed in; the failure is logged and the
/// button is enabled again.
#[component]
pub fn SignOutButton() -> impl IntoView {
    let busy = RwSignal::new(false);

    let on_click = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::sign_out().await;
            match next_location(&result) {
                // Stay busy until the page unloads.
                Some(url) => crate::util::auth::assign_location(url),
                None => {
                    if let Err(e) = result {
                        log::warn!("sign-out failed: {e}");
                    }
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <button class="button button--outline" type="button" disabled=move || busy.get() on:click=on_click>
            "Sign out"
        </button>
    }
}
