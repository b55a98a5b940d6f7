use leptos::prelude::*;

use super::icons::AlertIcon;
use crate::theme::ColorMode;

#[component]
pub fn ContributionsError(#[prop(into)] mode: Signal<ColorMode>) -> impl IntoView {
    view! {
        <div class=move || mode.get().class("contributions-error") role="alert">
            <AlertIcon />
            <div class="contributions-error__text">
                <h3>"Something went wrong loading this section."</h3>
                <p>"Please wait a few seconds and try reloading the page."</p>
            </div>
        </div>
    }
}
