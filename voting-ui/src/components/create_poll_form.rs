use crate::api::{app_error, CreatePollFn};
use crate::i18n::use_i18n;
use crate::state::{AuthState, Notices, PollsStore};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use voting_app::domain::{PollDraft, MAX_OPTIONS, MIN_OPTIONS};
use voting_errors::AppError;

/// Format of a `datetime-local` input value.
const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";

/// Reads a `datetime-local` value as local wall-clock time.
fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), DATETIME_LOCAL).ok()?;
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

#[component]
pub fn CreatePollForm(#[prop(into)] on_created: Callback<()>) -> impl IntoView {
    let i18n = use_i18n();
    let auth = expect_context::<AuthState>();
    let store = expect_context::<PollsStore>();
    let notices = expect_context::<Notices>();
    let create = ServerAction::<CreatePollFn>::new();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let options = RwSignal::new(PollDraft::blank().options);
    let expires = RwSignal::new(String::new());

    let draft = move || PollDraft {
        title: title.get(),
        description: description.get(),
        options: options.get(),
        expires_at: parse_expiry(&expires.get()),
    };
    let pending = create.pending();
    let can_submit = move || !pending.get() && draft().is_submittable();
    let min_expiry = Local::now().format(DATETIME_LOCAL).to_string();

    let reset = move || {
        title.set(String::new());
        description.set(String::new());
        options.set(PollDraft::blank().options);
        expires.set(String::new());
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let current = PollDraft {
            title: title.get_untracked(),
            description: description.get_untracked(),
            options: options.get_untracked(),
            expires_at: parse_expiry(&expires.get_untracked()),
        };
        if current.validate().is_err() {
            return;
        }
        if auth.user_id_untracked().is_none() {
            notices.failure("notice.create.failed", &AppError::AuthRequired);
            return;
        }
        create.dispatch(CreatePollFn { draft: current });
        reset();
    };

    Effect::new(move |_| {
        let Some(result) = create.value().get() else {
            return;
        };
        match result {
            Ok(poll) => {
                tracing::info!("Created poll {}", poll.id);
                notices.success("notice.poll.created", "notice.poll.created.detail");
                store.refetch();
                on_created.run(());
            }
            Err(err) => notices.failure("notice.create.failed", &app_error(&err)),
        }
    });

    let add_option = move |_| {
        options.update(|rows| {
            if rows.len() < MAX_OPTIONS {
                rows.push(String::new());
            }
        });
    };

    view! {
        <form class="card poll-form" on:submit=on_submit>
            <h2 class="card__title">{move || i18n.t("create.poll.form")}</h2>

            <label class="field">
                <span class="field__label">{move || i18n.t("poll.title")}</span>
                <input
                    type="text"
                    class="input"
                    placeholder=move || i18n.t("poll.title.placeholder")
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
            </label>

            <label class="field">
                <span class="field__label">{move || i18n.t("poll.description")}</span>
                <textarea
                    class="input input--area"
                    rows="3"
                    placeholder=move || i18n.t("poll.description.placeholder")
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
            </label>

            <div class="field">
                <span class="field__label">{move || i18n.t("poll.options")}</span>
                <For
                    each=move || 0..options.with(Vec::len)
                    key=|index| *index
                    children=move |index: usize| {
                        view! {
                            <div class="poll-form__option">
                                <input
                                    type="text"
                                    class="input"
                                    placeholder=move || format!("{} {}", i18n.t("option.placeholder"), index + 1)
                                    prop:value=move || options.with(|rows| rows.get(index).cloned().unwrap_or_default())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        options.update(|rows| {
                                            if let Some(row) = rows.get_mut(index) {
                                                *row = value;
                                            }
                                        });
                                    }
                                />
                                <Show when=move || options.with(|rows| rows.len() > MIN_OPTIONS)>
                                    <button
                                        type="button"
                                        class="button button--outline button--icon"
                                        title=move || i18n.t("remove.option")
                                        on:click=move |_| options.update(|rows| {
                                            if rows.len() > MIN_OPTIONS && index < rows.len() {
                                                rows.remove(index);
                                            }
                                        })
                                    >
                                        "×"
                                    </button>
                                </Show>
                            </div>
                        }
                    }
                />
                <button
                    type="button"
                    class="button button--outline button--small"
                    disabled=move || options.with(|rows| rows.len() >= MAX_OPTIONS)
                    on:click=add_option
                >
                    "+ " {move || i18n.t("add.option")}
                </button>
            </div>

            <label class="field">
                <span class="field__label">{move || i18n.t("poll.expires")}</span>
                <input
                    type="datetime-local"
                    class="input"
                    min=min_expiry
                    prop:value=move || expires.get()
                    on:input=move |ev| expires.set(event_target_value(&ev))
                />
            </label>

            <button type="submit" class="button button--primary button--block" disabled=move || !can_submit()>
                {move || if pending.get() { i18n.t("creating") } else { i18n.t("create.poll") }}
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_expiry_reads_local_time() {
        let parsed = parse_expiry("2030-05-01T14:30").unwrap();
        let expected = Local
            .with_ymd_and_hms(2030, 5, 1, 14, 30, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_expiry_rejects_blank_and_garbage() {
        assert_eq!(parse_expiry(""), None);
        assert_eq!(parse_expiry("tomorrow"), None);
    }
}
