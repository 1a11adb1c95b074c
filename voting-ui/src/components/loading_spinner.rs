use crate::i18n::use_i18n;
use leptos::prelude::*;

#[component]
pub fn LoadingSpinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    let i18n = use_i18n();
    let label = label.unwrap_or("loading.polls");

    view! {
        <div class="loading">
            <div class="loading__spinner"></div>
            <p class="loading__text">{move || i18n.t(label)}</p>
        </div>
    }
}
