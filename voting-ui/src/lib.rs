pub mod api;
pub mod components;
pub mod i18n;
pub mod pages;
pub mod state;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use i18n::I18n;
use pages::HomePage;
use state::{AuthState, Clock, Notices, PollsStore};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let i18n = I18n::provide();
    let auth = AuthState::provide();
    PollsStore::provide(auth);
    Notices::provide();
    Clock::provide();

    view! {
        <Html attr:lang=move || i18n.locale().html_lang()/>
        <Title text="Weighted Polls"/>
        <Meta name="description" content="Create polls and vote, votes with a reason count double"/>

        <Router>
            <main class="container">
                <Routes fallback=|| "Page not found">
                    <Route path=path!("/") view=HomePage/>
                </Routes>
            </main>
        </Router>
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
