use leptos::prelude::*;

use super::icons::{MergeIcon, PullRequestIcon};
use crate::contributions::Contribution;
use crate::theme::ColorMode;

#[component]
pub fn ContributionCard(
    contribution: Contribution,
    #[prop(into)] mode: Signal<ColorMode>,
) -> impl IntoView {
    let caption = contribution.full_name();
    let diff = contribution.diff_summary();
    let merged = contribution.status.is_merged();

    let Contribution {
        organisation,
        title,
        link,
        number,
        logo,
        ..
    } = contribution;
    let status_link = link.clone();
    let status_title = if merged { "Merged" } else { "Pull request" };

    let meta_class = if diff.is_some() {
        "contribution-card__meta contribution-card__meta--with-diff"
    } else {
        "contribution-card__meta"
    };

    view! {
        <li class=move || mode.get().class("contribution-card")>
            <div class="contribution-card__header">
                <img class="contribution-card__avatar" src=logo alt=organisation width="30" height="30" />
                <div class="contribution-card__body">
                    <a class="contribution-card__title" href=link target="_blank" rel="noopener noreferrer">
                        {title}
                    </a>
                    <p class="contribution-card__repo">{caption}</p>
                </div>
            </div>
            <div class=meta_class>
                <a
                    class="contribution-card__status"
                    href=status_link
                    target="_blank"
                    rel="noopener noreferrer"
                    title=status_title
                >
                    {if merged {
                        view! { <MergeIcon /> }.into_any()
                    } else {
                        view! { <PullRequestIcon /> }.into_any()
                    }}
                    {number}
                </a>
                {diff.map(|(added, deleted)| view! {
                    <p class="contribution-card__diff">
                        <span class="diff-added">"+" {added} " "</span>
                        <span class="diff-deleted">"-" {deleted}</span>
                    </p>
                })}
            </div>
        </li>
    }
}
