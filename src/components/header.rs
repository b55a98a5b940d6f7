use leptos::prelude::*;

use super::ThemeToggle;
use crate::theme::ColorMode;

#[component]
pub fn Header(mode: RwSignal<ColorMode>) -> impl IntoView {
    view! {
        <header class=move || mode.get().class("header")>
            <h1 class="header__name">
                <a href="/">"portfolio"</a>
            </h1>
            <ThemeToggle mode />
        </header>
        <div class="header__meta">
            <span class="header__tagline">"open source · rust · the web"</span>
            <nav class="header__nav">
                <a href="#openSource">"contributions"</a>
            </nav>
        </div>
    }
}
