use crate::domain::{Identity, NewPoll, NewVote, Poll, Profile, Vote};
use async_trait::async_trait;
use uuid::Uuid;
use voting_errors::AppError;

/// Which polls a listing returns. Both are ordered newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollFilter {
    Active,
    CreatedBy(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    Unavailable(String),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Conflict(_) => AppError::Conflict,
            BackendError::Unavailable(msg) => AppError::Backend(msg),
        }
    }
}

/// Row storage for polls, their options and votes, and user profiles.
///
/// Polls come back fully loaded: options in position order and every vote.
#[async_trait]
pub trait PollBackend: Send + Sync {
    async fn list_polls(&self, filter: PollFilter) -> Result<Vec<Poll>, BackendError>;

    async fn find_poll(&self, id: Uuid) -> Result<Option<Poll>, BackendError>;

    /// Writes the poll and its options together. No option row may exist
    /// without its poll.
    async fn create_poll(&self, creator_id: Uuid, poll: NewPoll) -> Result<Poll, BackendError>;

    /// Fails with [`BackendError::Conflict`] when the voter already voted in the poll.
    async fn insert_vote(&self, vote: NewVote) -> Result<Vote, BackendError>;

    async fn upsert_profile(&self, identity: Identity) -> Result<Profile, BackendError>;

    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, BackendError>;
}
