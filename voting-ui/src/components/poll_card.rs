use super::ResultsView;
use crate::api::{app_error, SubmitVoteFn};
use crate::i18n::use_i18n;
use crate::state::{AuthState, Clock, Notices, PollsStore};
use chrono::{DateTime, Local, Utc};
use leptos::prelude::*;
use uuid::Uuid;
use voting_app::domain::{Ballot, Poll, PollView, PollViewState};
use voting_errors::AppError;

/// Viewer-local time, filled in once the page runs in the browser.
fn local_time(
    clock: Clock,
    at: DateTime<Utc>,
    format: &'static str,
) -> impl Fn() -> String + Send + Sync + 'static {
    move || {
        if clock.is_live() {
            at.with_timezone(&Local).format(format).to_string()
        } else {
            String::new()
        }
    }
}

#[component]
pub fn PollCard(poll: Poll) -> impl IntoView {
    let i18n = use_i18n();
    let auth = expect_context::<AuthState>();
    let store = expect_context::<PollsStore>();
    let notices = expect_context::<Notices>();
    let clock = expect_context::<Clock>();
    let vote = ServerAction::<SubmitVoteFn>::new();
    let pending = vote.pending();

    let poll_id = poll.id;
    let poll = StoredValue::new(poll);
    let selected = RwSignal::new(None::<Uuid>);
    let reason = RwSignal::new(String::new());

    let expired = move || poll.with_value(|p| p.is_expired(clock.now()));
    let has_voted = move || poll.with_value(|p| p.has_voted(auth.user_id()));
    let current_view =
        move || store.view_state(poll_id).view(has_voted(), expired());
    let can_go_back = Signal::derive(move || {
        store
            .view_state(poll_id)
            .can_return_to_vote(has_voted(), expired())
    });

    let settle_refusal = move |err: AppError| {
        let mut refetch = false;
        store.update_view(poll_id, |state| refetch = state.vote_refused(&err));
        if refetch {
            store.refetch();
        }
        notices.failure("notice.vote.failed", &err);
    };

    let on_vote = move |_| {
        let Some(option_id) = selected.get_untracked() else {
            return;
        };
        if pending.get_untracked() {
            return;
        }
        let text = reason.get_untracked();
        let ballot = Ballot::new(poll_id, option_id, Some(text.as_str()));

        // Same gate the server runs, against the poll as rendered.
        let admitted = poll.with_value(|p| {
            ballot.admit(p, auth.user_id_untracked(), clock.now_untracked())
        });
        match admitted {
            Ok(_) => {
                vote.dispatch(SubmitVoteFn { ballot });
            }
            Err(err) => settle_refusal(err),
        }
    };

    Effect::new(move |_| {
        let Some(result) = vote.value().get() else {
            return;
        };
        match result {
            Ok(_) => {
                store.update_view(poll_id, PollViewState::vote_recorded);
                reason.set(String::new());
                notices.success("notice.vote.recorded", "notice.vote.recorded.detail");
                store.refetch();
            }
            Err(err) => settle_refusal(app_error(&err)),
        }
    });

    let on_back = move |_: ()| {
        let (voted, closed) = (has_voted(), expired());
        store.update_view(poll_id, |state| {
            state.back_to_vote(voted, closed);
        });
    };

    let header = poll.with_value(|p| {
        let expires_at = p.expires_at;
        view! {
            <div class="poll__header">
                <div class="poll__heading">
                    <h3 class="poll__title">{p.title.clone()}</h3>
                    {p.description.clone().map(|text| view! {
                        <p class="poll__description">{text}</p>
                    })}
                </div>
                <div class="poll__badges">
                    <Show when=expired>
                        <span class="badge badge--closed">{move || i18n.t("poll.expired")}</span>
                    </Show>
                    {expires_at.map(|at| view! {
                        <Show when=move || !expired()>
                            <span class="badge">
                                {move || i18n.t("poll.deadline")} ": " {local_time(clock, at, "%m/%d %H:%M")}
                            </span>
                        </Show>
                    })}
                </div>
            </div>
            <p class="poll__created">
                {move || i18n.t("poll.created.at")} ": " {local_time(clock, p.created_at, "%Y/%m/%d %H:%M")}
            </p>
        }
    });

    let ballot = move || {
        let options = poll.with_value(|p| p.options.clone());
        view! {
            <div class="ballot">
                <div class="ballot__options">
                    {options.into_iter().map(|option| {
                        let option_id = option.id;
                        view! {
                            <label class="ballot__option">
                                <input
                                    type="radio"
                                    name=format!("poll-{}", poll_id)
                                    prop:checked=move || selected.get() == Some(option_id)
                                    on:change=move |_| selected.set(Some(option_id))
                                />
                                <span>{option.text}</span>
                            </label>
                        }
                    }).collect_view()}
                </div>

                <label class="field">
                    <span class="field__label">
                        {move || i18n.t("vote.reason")}
                        <span class="ballot__bonus">" " {move || i18n.t("vote.reason.bonus")}</span>
                    </span>
                    <textarea
                        class="input input--area"
                        rows="2"
                        placeholder=move || i18n.t("vote.reason.placeholder")
                        prop:value=move || reason.get()
                        on:input=move |ev| reason.set(event_target_value(&ev))
                    ></textarea>
                </label>

                <div class="ballot__actions">
                    <button
                        type="button"
                        class="button button--primary"
                        disabled=move || selected.get().is_none() || pending.get() || expired()
                        on:click=on_vote
                    >
                        {move || if pending.get() { i18n.t("voting") } else { i18n.t("vote") }}
                    </button>
                    <button
                        type="button"
                        class="button button--outline"
                        disabled=move || pending.get()
                        on:click=move |_| store.update_view(poll_id, PollViewState::peek)
                    >
                        {move || i18n.t("view.results")}
                    </button>
                </div>
            </div>
        }
    };

    let results = move || {
        let snapshot = poll.get_value();
        let choice = auth
            .user_id()
            .and_then(|user_id| snapshot.vote_of(user_id))
            .map(|vote| vote.option_id);
        view! {
            <ResultsView poll=snapshot choice=choice can_go_back=can_go_back on_back=on_back/>
        }
    };

    view! {
        <article class="card poll">
            {header}
            {move || match current_view() {
                PollView::Voting => ballot().into_any(),
                PollView::ViewingResults => results().into_any(),
            }}
        </article>
    }
}
