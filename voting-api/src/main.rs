mod auth;
mod styles;

use axum::{
    extract::Query,
    routing::{get, post},
    Router,
};
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, Session, SessionManagerLayer};
use voting_app::{AppConfig, AppContext};
use voting_ui::api::{
    CreatePollFn, GetCurrentUserFn, ListActivePollsFn, ListMyPollsFn, SubmitVoteFn,
};
use voting_ui::App;

const SESSION_IDLE_DAYS: i64 = 7;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml"))?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let config = AppConfig::from_env();
    let app_context = AppContext::from_config(&config).await?;

    let secure_cookies = config
        .oauth
        .as_ref()
        .is_some_and(|oauth| oauth.redirect_uri.starts_with("https://"));
    // Lax so the cookie survives the redirect back from Google.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(SESSION_IDLE_DAYS)));

    let routes = generate_route_list(App);

    server_fn::axum::register_explicit::<GetCurrentUserFn>();
    server_fn::axum::register_explicit::<ListActivePollsFn>();
    server_fn::axum::register_explicit::<ListMyPollsFn>();
    server_fn::axum::register_explicit::<CreatePollFn>();
    server_fn::axum::register_explicit::<SubmitVoteFn>();
    tracing::info!("Registered server functions");

    let app = Router::new()
        .route("/auth/login", get({
            let ctx = app_context.clone();
            move |session: Session| auth::login(ctx.clone(), session)
        }))
        .route("/auth/callback", get({
            let ctx = app_context.clone();
            move |session: Session, query: Query<auth::CallbackQuery>| {
                auth::callback(ctx.clone(), session, query)
            }
        }))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get({
            let ctx = app_context.clone();
            move |session: Session| auth::me(ctx.clone(), session)
        }))
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |req| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(
                        move || provide_context(ctx.clone()),
                        req
                    ).await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(session_layer),
        )
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Mutations limited to 10/min and 60/hour per user");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html>
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🗳️</text></svg>"/>
                <style>{styles::CSS}</style>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
