//! Light/dark toggle button shared by every page header.

use leptos::prelude::*;

use crate::state::ui::UiState;
use crate::util::theme::{self, BrowserHost};

/// Icon shown for the current theme: a sun while dark, a moon while light.
fn toggle_glyph(dark: bool) -> &'static str {
    if dark { "\u{2600}" } else { "\u{263E}" }
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let on_click = move |_| {
        let next = theme::toggle(&BrowserHost, ui.get_untracked().theme);
        ui.update(|u| u.theme = next);
    };

    view! {
        <button class="theme-toggle" type="button" aria-label="Toggle theme" title="Toggle theme" on:click=on_click>
            {move || toggle_glyph(ui.get().theme.is_dark())}
        </button>
    }
}
