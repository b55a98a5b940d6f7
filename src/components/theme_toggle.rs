use leptos::prelude::*;

use super::icons::{MoonIcon, SunIcon};
use crate::theme::ColorMode;

#[component]
pub fn ThemeToggle(mode: RwSignal<ColorMode>) -> impl IntoView {
    let is_dark = move || mode.get().is_dark();

    let label = move || {
        if is_dark() {
            "Switch to light mode"
        } else {
            "Switch to dark mode"
        }
    };

    view! {
        <button
            class=move || mode.get().class("theme-toggle")
            on:click=move |_| mode.update(|m| *m = m.toggled())
            aria-label=label
            title=label
        >
            <span class="theme-toggle__icon theme-toggle__icon--light" aria-hidden="true">
                <SunIcon />
            </span>
            <span class="theme-toggle__icon theme-toggle__icon--dark" aria-hidden="true">
                <MoonIcon />
            </span>
        </button>
    }
}
