use leptos::prelude::*;

use crate::theme::ColorMode;

/// One button in the filter bar
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub value: String,
    pub count: usize,
}

#[component]
pub fn FilterBar(
    options: Vec<FilterOption>,
    #[prop(into)] active: Signal<String>,
    #[prop(into)] on_select: Callback<String>,
    #[prop(into)] mode: Signal<ColorMode>,
) -> impl IntoView {
    view! {
        <div class=move || mode.get().class("filter-bar") role="toolbar" aria-label="Filter by repository">
            {options
                .into_iter()
                .map(|opt| {
                    let value = opt.value.clone();
                    let is_active = {
                        let value = opt.value.clone();
                        move || active.with(|a| *a == value)
                    };
                    view! {
                        <button
                            class="filter-btn"
                            class:active=is_active
                            on:click=move |_| on_select.run(value.clone())
                        >
                            {opt.value}
                            <span class="filter-count">{opt.count}</span>
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
