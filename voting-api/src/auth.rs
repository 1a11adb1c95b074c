use axum::{
    extract::Query,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use oauth2::PkceCodeVerifier;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use voting_app::domain::Profile;
use voting_app::AppContext;
use voting_errors::AppError;
use voting_ui::api::SESSION_USER_KEY;

const CSRF_KEY: &str = "oauth_csrf";
const PKCE_KEY: &str = "oauth_pkce";

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    authenticated: bool,
    user: Option<Profile>,
}

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("Session error: {}", e))
}

/// Starts the Google flow, keeping the CSRF state and PKCE verifier in the session.
pub async fn login(ctx: AppContext, session: Session) -> Response {
    let Some(oauth) = ctx.oauth.as_ref() else {
        tracing::warn!("Sign-in requested but Google OAuth is not configured");
        return AppError::Internal("Sign-in is not configured".to_string()).into_response();
    };

    let (url, csrf, verifier) = oauth.authorize_url();

    let stored = async {
        session
            .insert(CSRF_KEY, csrf.secret().as_str())
            .await
            .map_err(session_error)?;
        session
            .insert(PKCE_KEY, verifier.secret().as_str())
            .await
            .map_err(session_error)
    };
    if let Err(e) = stored.await {
        tracing::error!("Failed to start sign-in: {}", e);
        return e.into_response();
    }

    Redirect::to(&url).into_response()
}

pub async fn callback(
    ctx: AppContext,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Response {
    match complete_sign_in(&ctx, &session, query).await {
        Ok(profile) => tracing::info!("Session started for profile {}", profile.id),
        Err(e) => tracing::warn!("Sign-in failed: {}", e),
    }
    Redirect::to("/").into_response()
}

async fn complete_sign_in(
    ctx: &AppContext,
    session: &Session,
    query: CallbackQuery,
) -> Result<Profile, AppError> {
    let oauth = ctx
        .oauth
        .as_ref()
        .ok_or_else(|| AppError::Internal("Sign-in is not configured".to_string()))?;

    // One-shot: the handshake values are dropped whatever the outcome.
    let expected_state: Option<String> = session.remove(CSRF_KEY).await.map_err(session_error)?;
    let verifier: Option<String> = session.remove(PKCE_KEY).await.map_err(session_error)?;

    if let Some(error) = query.error {
        return Err(AppError::Validation(format!("provider returned {}", error)));
    }
    let code = query
        .code
        .ok_or_else(|| AppError::Validation("missing authorization code".to_string()))?;

    match (query.state, expected_state) {
        (Some(state), Some(expected)) if state == expected => {}
        _ => return Err(AppError::Validation("state mismatch".to_string())),
    }
    let verifier = verifier
        .ok_or_else(|| AppError::Validation("missing PKCE verifier".to_string()))?;

    let identity = oauth
        .exchange_code(&code, PkceCodeVerifier::new(verifier))
        .await?;
    let profile = ctx.accounts.sign_in(identity).await?;

    session.cycle_id().await.map_err(session_error)?;
    session
        .insert(SESSION_USER_KEY, profile.id)
        .await
        .map_err(session_error)?;

    Ok(profile)
}

pub async fn logout(session: Session) -> Response {
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to clear session: {}", e);
    }
    Redirect::to("/").into_response()
}

pub async fn me(ctx: AppContext, session: Session) -> Response {
    let user_id = match session.get::<uuid::Uuid>(SESSION_USER_KEY).await {
        Ok(user_id) => user_id,
        Err(e) => return session_error(e).into_response(),
    };

    match ctx.accounts.current_profile(user_id).await {
        Ok(user) => Json(MeResponse {
            authenticated: user.is_some(),
            user,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}
