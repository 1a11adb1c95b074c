use crate::i18n::use_i18n;
use crate::state::{NoticeTone, Notices};
use leptos::prelude::*;

/// Shows the latest notice until it is dismissed or replaced.
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let i18n = use_i18n();
    let notices = expect_context::<Notices>();

    move || {
        notices.current().map(|notice| {
            let class = match notice.tone {
                NoticeTone::Success => "notice notice--success",
                NoticeTone::Error => "notice notice--error",
            };
            view! {
                <div class=class role="status">
                    <div class="notice__body">
                        <p class="notice__title">{move || i18n.t(notice.title)}</p>
                        <p class="notice__detail">{move || i18n.t(notice.detail)}</p>
                    </div>
                    <button
                        type="button"
                        class="notice__close"
                        title=move || i18n.t("notice.dismiss")
                        on:click=move |_| notices.dismiss()
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
