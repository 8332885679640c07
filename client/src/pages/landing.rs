//! Public landing page: header, hero, feature cards, footer.

use leptos::prelude::*;

use crate::components::theme_toggle::ThemeToggle;

/// `(title, body)` for each feature card.
const FEATURES: &[(&str, &str)] = &[
    (
        "AI-Powered Launch Kits",
        "Generate landing copy, emails, social posts, and press summaries instantly.",
    ),
    (
        "Beyond Translation",
        "Messaging adapts culturally for each market, not just word-for-word translation.",
    ),
    ("Live Language Switching", "Preview translated launch content instantly."),
];

#[component]
fn FeatureCard(title: &'static str, body: &'static str) -> impl IntoView {
    view! {
        <article class="card feature-card">
            <h3 class="card__title">{title}</h3>
            <p class="card__subtitle">{body}</p>
        </article>
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing-page">
            <header class="site-header">
                <a href="/" class="brand">
                    <span class="brand__mark">"\u{2726}"</span>
                    "PolyLaunch"
                </a>
                <nav class="site-header__actions">
                    <a href="/login" class="button button--ghost">"Sign in"</a>
                    <ThemeToggle/>
                </nav>
            </header>

            <main class="landing-main">
                <section class="hero">
                    <p class="hero__eyebrow">"AI Global Launch Kit"</p>
                    <h1 class="hero__title">"Launch Globally. Instantly."</h1>
                    <p class="hero__lede">
                        "Generate, localize, and synchronize your entire product launch across multiple languages powered by AI."
                    </p>
                    <div class="hero__actions">
                        <a href="/login" class="button button--primary button--large">"Generate My Launch Kit"</a>
                        <a href="#features" class="button button--outline button--large">"See Features"</a>
                    </div>
                </section>

                <section id="features" class="features">
                    <h2>"Core Features"</h2>
                    <div class="features__grid">
                        {FEATURES
                            .iter()
                            .map(|&(title, body)| view! { <FeatureCard title=title body=body/> })
                            .collect_view()}
                    </div>
                </section>

                <section class="card cta">
                    <h2>"Stop Launching in Just One Language."</h2>
                    <p class="muted">"Build globally with AI-native localization and market-aware launch messaging."</p>
                    <a href="/login" class="button button--primary button--large">"Start Building Globally"</a>
                </section>
            </main>

            <footer class="site-footer">
                <span>"\u{a9} PolyLaunch"</span>
                <a href="/login" class="link">"Sign in"</a>
            </footer>
        </div>
    }
}
