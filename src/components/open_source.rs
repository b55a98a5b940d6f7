use leptos::prelude::*;

use super::{ContributionCard, ContributionsError, FilterBar, FilterOption};
use crate::contributions::{
    get_contributions, Contribution, FetchResult, FilterEngine, FILTER_DEBOUNCE,
};
use crate::theme::ColorMode;

/// The "Open Source Contributions" page section.
///
/// Requests the list once; until it arrives the grid stays empty.
#[component]
pub fn OpenSource(#[prop(into)] mode: Signal<ColorMode>) -> impl IntoView {
    let contributions = Resource::new(|| (), |()| get_contributions());

    view! {
        <section id="openSource" class="open-source">
            <h2 class=move || mode.get().class("open-source__heading")>
                "Open Source Contributions"
            </h2>
            <Suspense fallback=|| view! { <ul class="contribution-grid"></ul> }>
                {move || Suspend::new(async move {
                    // A transport failure renders the same as an exhausted fetch
                    let result = contributions
                        .await
                        .unwrap_or_else(|e| FetchResult::failed(0, e.to_string()));
                    view! { <ContributionsPanel result mode /> }
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn ContributionsPanel(result: FetchResult, mode: Signal<ColorMode>) -> impl IntoView {
    let engine = RwSignal::new(FilterEngine::from_result(result));

    if engine.with_untracked(|e| e.failure().is_some()) {
        return view! { <ContributionsError mode /> }.into_any();
    }

    let options = engine.with_untracked(|e| {
        e.filters()
            .iter()
            .map(|f| FilterOption {
                value: f.clone(),
                count: e.repo_count(f),
            })
            .collect::<Vec<_>>()
    });

    let active = Signal::derive(move || engine.with(|e| e.active_filter().to_string()));

    let on_select = move |filter: String| {
        let Some(pending) = engine.try_update(|e| e.select(&filter)).flatten() else {
            return;
        };
        set_timeout(
            move || {
                engine.try_update(|e| e.apply(&pending));
            },
            FILTER_DEBOUNCE,
        );
    };

    view! {
        <FilterBar options active on_select mode />
        <ul class="contribution-grid">
            // Ids may repeat in the feed, so the position is part of the key
            <For
                each=move || {
                    engine.with(|e| e.visible().iter().cloned().enumerate().collect::<Vec<_>>())
                }
                key=|(index, c): &(usize, Contribution)| (*index, c.id.clone())
                children=move |(_, contribution): (usize, Contribution)| {
                    view! { <ContributionCard contribution mode /> }
                }
            />
        </ul>
    }
    .into_any()
}
