use crate::i18n::use_i18n;
use leptos::prelude::*;

#[component]
pub fn ErrorDisplay(
    #[prop(into)] title: &'static str,
    #[prop(into)] message: &'static str,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    let i18n = use_i18n();

    view! {
        <div class="error">
            <p class="error__title">{move || i18n.t(title)}</p>
            <p class="error__message">{move || i18n.t(message)}</p>
            {move || on_retry.map(|retry| view! {
                <button
                    class="button button--outline error__retry"
                    on:click=move |_| retry.run(())
                >
                    "↻"
                </button>
            })}
        </div>
    }
}
