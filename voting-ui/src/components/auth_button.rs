use crate::i18n::use_i18n;
use crate::state::AuthState;
use leptos::prelude::*;

/// Sign-in link, or the signed-in profile with a sign-out form.
#[component]
pub fn AuthButton() -> impl IntoView {
    let i18n = use_i18n();
    let auth = expect_context::<AuthState>();

    view! {
        <div class="auth">
            <Suspense fallback=move || view! {
                <button class="button button--outline" disabled=true>
                    {move || i18n.t("auth.loading")}
                </button>
            }>
                {move || auth.user.get().map(|result| match result {
                    Ok(Some(profile)) => {
                        let name = profile.display_name();
                        let avatar = match profile.avatar_url.clone() {
                            Some(src) => view! {
                                <img class="avatar" src=src alt=name.clone()/>
                            }.into_any(),
                            None => view! {
                                <span class="avatar avatar--fallback">{profile.initial()}</span>
                            }.into_any(),
                        };
                        view! {
                            <div class="auth__user">
                                {avatar}
                                <span class="auth__name">{name}</span>
                                <form action="/auth/logout" method="post">
                                    <button type="submit" class="button button--outline button--small">
                                        {move || i18n.t("auth.sign.out")}
                                    </button>
                                </form>
                            </div>
                        }.into_any()
                    }
                    _ => view! {
                        <a href="/auth/login" rel="external" class="button button--outline">
                            {move || i18n.t("auth.sign.in")}
                        </a>
                    }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
