use super::backend::{PollBackend, PollFilter};
use crate::domain::{Ballot, Poll, PollDraft, Vote};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;
use voting_errors::AppError;

/// Reads and writes polls and votes on behalf of the signed-in user.
#[derive(Clone)]
pub struct PollService {
    backend: Arc<dyn PollBackend>,
}

impl PollService {
    pub fn new(backend: Arc<dyn PollBackend>) -> Self {
        Self { backend }
    }

    pub async fn active_polls(&self) -> Result<Vec<Poll>, AppError> {
        self.backend
            .list_polls(PollFilter::Active)
            .await
            .map_err(|e| log_failure("list active polls", e.into()))
    }

    /// Signed-out viewers simply have no polls of their own.
    pub async fn polls_created_by(&self, creator: Option<Uuid>) -> Result<Vec<Poll>, AppError> {
        let Some(creator) = creator else {
            return Ok(Vec::new());
        };
        self.backend
            .list_polls(PollFilter::CreatedBy(creator))
            .await
            .map_err(|e| log_failure("list own polls", e.into()))
    }

    pub async fn create_poll(
        &self,
        creator: Option<Uuid>,
        draft: PollDraft,
    ) -> Result<Poll, AppError> {
        let creator = creator.ok_or(AppError::AuthRequired)?;
        let new_poll = draft.validate()?;

        let poll = self
            .backend
            .create_poll(creator, new_poll)
            .await
            .map_err(|e| log_failure("create poll", e.into()))?;

        tracing::info!(
            "Poll {} created by {} with {} options",
            poll.id,
            creator,
            poll.options.len()
        );
        Ok(poll)
    }

    /// Admits the ballot against the current poll state, then writes it.
    ///
    /// Expired polls and repeat voters are refused before any write; a repeat
    /// vote that slips past the check still comes back as [`AppError::Conflict`].
    pub async fn submit_vote(
        &self,
        voter: Option<Uuid>,
        ballot: Ballot,
        now: DateTime<Utc>,
    ) -> Result<Vote, AppError> {
        if voter.is_none() {
            return Err(AppError::AuthRequired);
        }

        let poll = self
            .backend
            .find_poll(ballot.poll_id)
            .await
            .map_err(|e| log_failure("load poll", e.into()))?
            .ok_or(AppError::NotFound)?;

        let new_vote = ballot.admit(&poll, voter, now).map_err(|e| {
            tracing::info!("Vote on poll {} refused: {}", poll.id, e);
            e
        })?;

        match self.backend.insert_vote(new_vote).await {
            Ok(vote) => {
                tracing::info!("Vote recorded on poll {} with weight {}", vote.poll_id, vote.weight);
                Ok(vote)
            }
            Err(e) => {
                let err: AppError = e.into();
                if err == AppError::Conflict {
                    tracing::info!("Duplicate vote on poll {} ignored", poll.id);
                    Err(err)
                } else {
                    Err(log_failure("insert vote", err))
                }
            }
        }
    }
}

fn log_failure(action: &str, err: AppError) -> AppError {
    if err.is_expected() {
        tracing::debug!("{} refused: {}", action, err);
    } else {
        tracing::error!("Failed to {}: {}", action, err);
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::BackendError;
    use crate::domain::{Identity, NewPoll, NewVote, Profile};
    use crate::infrastructure::memory::InMemoryBackend;
    use chrono::Duration;

    fn service() -> (PollService, Arc<InMemoryBackend>) {
        let backend = Arc::new(InMemoryBackend::new());
        (PollService::new(backend.clone()), backend)
    }

    fn lunch() -> PollDraft {
        PollDraft {
            title: "Lunch".to_string(),
            description: String::new(),
            options: vec!["Pizza".to_string(), "Sushi".to_string(), String::new()],
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_poll_keeps_filled_options() {
        let (service, _) = service();
        let creator = Uuid::new_v4();

        let poll = service.create_poll(Some(creator), lunch()).await.unwrap();
        let texts: Vec<&str> = poll.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["Pizza", "Sushi"]);
        assert_eq!(poll.creator_id, creator);
        assert!(poll.is_active);

        let mine = service.polls_created_by(Some(creator)).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(service.active_polls().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_writes_nothing() {
        let (service, backend) = service();
        let mut draft = lunch();
        draft.options = vec!["Pizza".to_string(), "  ".to_string(), String::new()];

        let err = service.create_poll(Some(Uuid::new_v4()), draft).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(backend.poll_count(), 0);
    }

    #[tokio::test]
    async fn test_create_requires_sign_in() {
        let (service, backend) = service();
        let err = service.create_poll(None, lunch()).await.unwrap_err();
        assert_eq!(err, AppError::AuthRequired);
        assert_eq!(backend.poll_count(), 0);
    }

    #[tokio::test]
    async fn test_second_vote_conflicts_and_count_is_unchanged() {
        let (service, _) = service();
        let poll = service.create_poll(Some(Uuid::new_v4()), lunch()).await.unwrap();
        let voter = Uuid::new_v4();
        let pizza = poll.options[0].id;

        let vote = service
            .submit_vote(Some(voter), Ballot::new(poll.id, pizza, Some("I like it")), Utc::now())
            .await
            .unwrap();
        assert_eq!(vote.weight, 2);

        let again = service
            .submit_vote(Some(voter), Ballot::new(poll.id, poll.options[1].id, None), Utc::now())
            .await;
        assert_eq!(again, Err(AppError::Conflict));

        let polls = service.active_polls().await.unwrap();
        assert_eq!(polls[0].votes.len(), 1);
        assert_eq!(crate::domain::total_weight(&polls[0]), 2);
    }

    /// Serves every `find_poll` from the first read, like a replica that lags behind.
    struct StaleReads {
        inner: InMemoryBackend,
        first_read: std::sync::Mutex<Option<Poll>>,
    }

    #[async_trait::async_trait]
    impl PollBackend for StaleReads {
        async fn list_polls(&self, filter: PollFilter) -> Result<Vec<Poll>, BackendError> {
            self.inner.list_polls(filter).await
        }

        async fn find_poll(&self, id: Uuid) -> Result<Option<Poll>, BackendError> {
            if let Some(poll) = self.first_read.lock().unwrap().clone() {
                return Ok(Some(poll));
            }
            let poll = self.inner.find_poll(id).await?;
            *self.first_read.lock().unwrap() = poll.clone();
            Ok(poll)
        }

        async fn create_poll(&self, creator_id: Uuid, poll: NewPoll) -> Result<Poll, BackendError> {
            self.inner.create_poll(creator_id, poll).await
        }

        async fn insert_vote(&self, vote: NewVote) -> Result<Vote, BackendError> {
            self.inner.insert_vote(vote).await
        }

        async fn upsert_profile(&self, identity: Identity) -> Result<Profile, BackendError> {
            self.inner.upsert_profile(identity).await
        }

        async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, BackendError> {
            self.inner.find_profile(id).await
        }
    }

    #[tokio::test]
    async fn test_duplicate_past_a_stale_read_is_conflict() {
        let backend = Arc::new(StaleReads {
            inner: InMemoryBackend::new(),
            first_read: std::sync::Mutex::new(None),
        });
        let service = PollService::new(backend.clone());
        let poll = service.create_poll(Some(Uuid::new_v4()), lunch()).await.unwrap();
        let voter = Uuid::new_v4();

        let first = service
            .submit_vote(Some(voter), Ballot::new(poll.id, poll.options[0].id, Some("I like it")), Utc::now())
            .await
            .map(|vote| vote.weight);
        assert_eq!(first, Ok(2));

        // The gate still sees the poll without the first vote; the write is refused.
        let second = service
            .submit_vote(Some(voter), Ballot::new(poll.id, poll.options[1].id, None), Utc::now())
            .await;
        assert_eq!(second, Err(AppError::Conflict));

        let stored = backend.inner.find_poll(poll.id).await.unwrap().unwrap();
        assert_eq!(stored.votes.len(), 1);
        assert_eq!(crate::domain::total_weight(&stored), 2);
    }

    #[tokio::test]
    async fn test_vote_needs_sign_in() {
        let (service, _) = service();
        let poll = service.create_poll(Some(Uuid::new_v4()), lunch()).await.unwrap();

        let result = service
            .submit_vote(None, Ballot::new(poll.id, poll.options[0].id, None), Utc::now())
            .await;
        assert_eq!(result, Err(AppError::AuthRequired));
    }

    #[tokio::test]
    async fn test_expired_poll_refuses_votes() {
        let (service, _) = service();
        let mut draft = lunch();
        draft.expires_at = Some(Utc::now() + Duration::hours(1));
        let poll = service.create_poll(Some(Uuid::new_v4()), draft).await.unwrap();

        let later = Utc::now() + Duration::hours(2);
        let result = service
            .submit_vote(
                Some(Uuid::new_v4()),
                Ballot::new(poll.id, poll.options[0].id, None),
                later,
            )
            .await;
        assert_eq!(result, Err(AppError::PollClosed));
        assert!(poll.is_expired(later));
    }

    #[tokio::test]
    async fn test_unknown_poll_is_not_found() {
        let (service, _) = service();
        let result = service
            .submit_vote(
                Some(Uuid::new_v4()),
                Ballot::new(Uuid::new_v4(), Uuid::new_v4(), None),
                Utc::now(),
            )
            .await;
        assert_eq!(result, Err(AppError::NotFound));
    }

    #[tokio::test]
    async fn test_signed_out_has_no_own_polls() {
        let (service, _) = service();
        service.create_poll(Some(Uuid::new_v4()), lunch()).await.unwrap();
        assert!(service.polls_created_by(None).await.unwrap().is_empty());
    }
}
