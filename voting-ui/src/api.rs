use leptos::prelude::*;
use server_fn::ServerFnError;
use voting_app::domain::{Ballot, Poll, PollDraft, Profile, Vote};
use voting_errors::AppError;

/// Session key holding the signed-in profile id.
pub const SESSION_USER_KEY: &str = "user_id";

/// Recovers the typed error a server function reported.
pub fn app_error(err: &ServerFnError) -> AppError {
    match err {
        ServerFnError::ServerError(message) => AppError::from_message(message),
        other => AppError::Backend(other.to_string()),
    }
}

#[cfg(feature = "ssr")]
fn server_error(err: AppError) -> ServerFnError {
    ServerFnError::new(err.to_string())
}

#[cfg(feature = "ssr")]
async fn session_user_id() -> Option<uuid::Uuid> {
    use tower_sessions::Session;

    let session = leptos_axum::extract::<Session>().await.ok()?;
    match session.get::<uuid::Uuid>(SESSION_USER_KEY).await {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::warn!("Failed to read session: {}", e);
            None
        }
    }
}

#[server(GetCurrentUserFn, "/api", endpoint = "current_user")]
pub async fn get_current_user() -> Result<Option<Profile>, ServerFnError> {
    use voting_app::AppContext;

    let Some(ctx) = use_context::<AppContext>() else {
        return Ok(None);
    };

    ctx.accounts
        .current_profile(session_user_id().await)
        .await
        .map_err(server_error)
}

#[server(ListActivePollsFn, "/api", endpoint = "list_active_polls")]
pub async fn list_active_polls() -> Result<Vec<Poll>, ServerFnError> {
    use voting_app::AppContext;

    let ctx = expect_context::<AppContext>();
    ctx.polls.active_polls().await.map_err(server_error)
}

#[server(ListMyPollsFn, "/api", endpoint = "list_my_polls")]
pub async fn list_my_polls() -> Result<Vec<Poll>, ServerFnError> {
    use voting_app::AppContext;

    let ctx = expect_context::<AppContext>();
    ctx.polls
        .polls_created_by(session_user_id().await)
        .await
        .map_err(server_error)
}

#[server(CreatePollFn, "/api", endpoint = "create_poll", input = server_fn::codec::Json)]
pub async fn create_poll(draft: PollDraft) -> Result<Poll, ServerFnError> {
    use voting_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let user_id = session_user_id().await;

    if let Some(id) = user_id {
        ctx.rate_limiter.check(id).map_err(server_error)?;
    }

    let poll = ctx
        .polls
        .create_poll(user_id, draft)
        .await
        .map_err(server_error)?;

    if let Some(id) = user_id {
        ctx.rate_limiter.record(id);
    }
    Ok(poll)
}

#[server(SubmitVoteFn, "/api", endpoint = "submit_vote", input = server_fn::codec::Json)]
pub async fn submit_vote(ballot: Ballot) -> Result<Vote, ServerFnError> {
    use voting_app::AppContext;

    let ctx = expect_context::<AppContext>();
    let user_id = session_user_id().await;

    if let Some(id) = user_id {
        ctx.rate_limiter.check(id).map_err(server_error)?;
    }

    // Re-normalized so a hand-crafted request cannot carry a blank reason.
    let ballot = Ballot::new(ballot.poll_id, ballot.option_id, ballot.reason.as_deref());

    let vote = ctx
        .polls
        .submit_vote(user_id, ballot, chrono::Utc::now())
        .await
        .map_err(server_error)?;

    if let Some(id) = user_id {
        ctx.rate_limiter.record(id);
    }
    Ok(vote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_message_round_trips() {
        let err = ServerFnError::new(AppError::Conflict.to_string());
        assert_eq!(app_error(&err), AppError::Conflict);

        let err = ServerFnError::new(AppError::RateLimited(30).to_string());
        assert_eq!(app_error(&err), AppError::RateLimited(30));
    }

    #[test]
    fn test_transport_failure_is_backend_error() {
        let err: ServerFnError = ServerFnError::Request("connection reset".to_string());
        assert!(matches!(app_error(&err), AppError::Backend(_)));
    }
}
