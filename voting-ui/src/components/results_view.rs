use crate::i18n::use_i18n;
use leptos::prelude::*;
use uuid::Uuid;
use voting_app::domain::{tally, total_weight, Poll};

/// Weighted tally of a poll, one bar per option, with the reasons voters gave.
#[component]
pub fn ResultsView(
    poll: Poll,
    /// Option the viewer voted for, marked with a check.
    choice: Option<Uuid>,
    #[prop(into)] can_go_back: Signal<bool>,
    #[prop(into)] on_back: Callback<()>,
) -> impl IntoView {
    let i18n = use_i18n();
    let total = total_weight(&poll);

    let rows = tally(&poll)
        .into_iter()
        .map(|row| {
            let mine = choice == Some(row.option_id);
            let bar_width = format!("width: {}%", row.percentage);
            let reasons = (!row.reasons.is_empty()).then(|| {
                view! {
                    <ul class="results__reasons">
                        {row.reasons.into_iter().map(|reason| view! {
                            <li class="results__reason">
                                <span class="results__reason-label">{move || i18n.t("reason")} ": "</span>
                                {reason.text}
                                <span class="results__reason-weight">
                                    " (" {move || i18n.t("weight")} ": " {reason.weight} ")"
                                </span>
                            </li>
                        }).collect_view()}
                    </ul>
                }
            });

            view! {
                <li class=if mine { "results__option results__option--mine" } else { "results__option" }>
                    <div class="results__head">
                        <span class="results__text">
                            {row.text}
                            {mine.then(|| view! { <span class="results__check">" ✓"</span> })}
                        </span>
                        <span class="results__count">
                            {row.weight} " " {move || i18n.t("votes")} " (" {row.percentage} "%)"
                        </span>
                    </div>
                    <div class="results__bar">
                        <div class="results__fill" style=bar_width></div>
                    </div>
                    {reasons}
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="results">
            <div class="results__summary">
                <span class="results__heading">{move || i18n.t("voting.results")}</span>
                <span class="results__total">
                    {move || i18n.t("total.votes")} ": " {total} " (" {move || i18n.t("weighted.calculation")} ")"
                </span>
            </div>
            <ul class="results__list">{rows}</ul>
            <Show when=move || can_go_back.get()>
                <button
                    type="button"
                    class="button button--outline button--block"
                    on:click=move |_| on_back.run(())
                >
                    {move || i18n.t("back.to.vote")}
                </button>
            </Show>
        </div>
    }
}
