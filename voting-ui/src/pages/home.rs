use crate::components::{
    AuthButton, CreatePollForm, ErrorDisplay, LoadingSpinner, NoticeBanner, PollCard,
};
use crate::i18n::use_i18n;
use crate::state::PollsStore;
use leptos::prelude::*;
use server_fn::ServerFnError;
use voting_app::domain::Poll;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    All,
    Mine,
}

#[component]
pub fn HomePage() -> impl IntoView {
    let i18n = use_i18n();
    let store = expect_context::<PollsStore>();
    let show_create = RwSignal::new(false);
    let tab = RwSignal::new(Tab::All);

    let tab_class = move |which: Tab| {
        if tab.get() == which {
            "tabs__tab tabs__tab--active"
        } else {
            "tabs__tab"
        }
    };

    view! {
        <header class="hero">
            <div class="hero__bar">
                <button
                    type="button"
                    class="button button--ghost button--small"
                    on:click=move |_| i18n.toggle()
                >
                    {move || i18n.t("language.toggle")}
                </button>
                <AuthButton/>
            </div>
            <h1 class="hero__title">{move || i18n.t("voting.system")}</h1>
            <p class="hero__subtitle">{move || i18n.t("voting.description")}</p>
        </header>

        <NoticeBanner/>

        <div class="toolbar">
            <button
                type="button"
                class="button button--primary"
                on:click=move |_| show_create.update(|open| *open = !*open)
            >
                {move || if show_create.get() { i18n.t("cancel.create") } else { i18n.t("create.new.poll") }}
            </button>
        </div>

        <Show when=move || show_create.get()>
            <CreatePollForm on_created=move |_: ()| show_create.set(false)/>
        </Show>

        <nav class="tabs">
            <button type="button" class=move || tab_class(Tab::All) on:click=move |_| tab.set(Tab::All)>
                {move || i18n.t("tab.all")}
            </button>
            <button type="button" class=move || tab_class(Tab::Mine) on:click=move |_| tab.set(Tab::Mine)>
                {move || i18n.t("tab.mine")}
            </button>
        </nav>

        {move || match tab.get() {
            Tab::All => view! { <PollList polls=store.active empty="no.polls"/> }.into_any(),
            Tab::Mine => view! { <PollList polls=store.mine empty="no.my.polls"/> }.into_any(),
        }}
    }
}

#[component]
fn PollList(
    polls: Resource<Result<Vec<Poll>, ServerFnError>>,
    empty: &'static str,
) -> impl IntoView {
    let i18n = use_i18n();
    let store = expect_context::<PollsStore>();

    view! {
        <Transition fallback=move || view! { <LoadingSpinner/> }>
            {move || polls.get().map(|result| match result {
                Ok(list) if list.is_empty() => view! {
                    <p class="empty">{move || i18n.t(empty)}</p>
                }.into_any(),
                Ok(list) => view! {
                    <div class="poll-list">
                        {list.into_iter().map(|poll| view! { <PollCard poll=poll/> }).collect_view()}
                    </div>
                }.into_any(),
                Err(err) => {
                    tracing::error!("Failed to load polls: {}", err);
                    view! {
                        <ErrorDisplay
                            title="notice.load.failed"
                            message="error.load.polls"
                            on_retry=Callback::new(move |_| store.refetch())
                        />
                    }.into_any()
                }
            })}
        </Transition>
    }
}
