use super::backend::{BackendError, PollBackend};
use crate::domain::{Identity, Profile};
use std::sync::Arc;
use uuid::Uuid;
use voting_errors::AppError;

/// Profiles of people who signed in through the identity provider.
#[derive(Clone)]
pub struct AccountService {
    backend: Arc<dyn PollBackend>,
}

impl AccountService {
    pub fn new(backend: Arc<dyn PollBackend>) -> Self {
        Self { backend }
    }

    /// Records a completed sign-in, refreshing name and avatar on repeat visits.
    ///
    /// Two first sign-ins racing on the same provider id collide on its unique
    /// key; the loser retries once and lands on the update path.
    pub async fn sign_in(&self, identity: Identity) -> Result<Profile, AppError> {
        let profile = match self.backend.upsert_profile(identity.clone()).await {
            Err(BackendError::Conflict(constraint)) => {
                tracing::info!("Profile insert raced on {}, retrying", constraint);
                self.backend.upsert_profile(identity).await
            }
            other => other,
        }
        .map_err(|e| {
            tracing::error!("Failed to store profile: {}", e);
            match e {
                BackendError::Conflict(constraint) => {
                    AppError::Backend(format!("profile conflict on {}", constraint))
                }
                other => AppError::from(other),
            }
        })?;
        tracing::info!("Profile {} signed in", profile.id);
        Ok(profile)
    }

    pub async fn current_profile(&self, id: Option<Uuid>) -> Result<Option<Profile>, AppError> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.backend.find_profile(id).await.map_err(|e| {
            tracing::error!("Failed to load profile {}: {}", id, e);
            AppError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PollFilter;
    use crate::domain::{NewPoll, NewVote, Poll, Vote};
    use crate::infrastructure::memory::InMemoryBackend;

    fn identity(name: &str) -> Identity {
        Identity {
            provider_id: "google-123".to_string(),
            email: Some("ana@example.com".to_string()),
            name: Some(name.to_string()),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_repeat_sign_in_updates_profile() {
        let accounts = AccountService::new(Arc::new(InMemoryBackend::new()));

        let first = accounts.sign_in(identity("Ana")).await.unwrap();
        let second = accounts.sign_in(identity("Ana Lima")).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.name.as_deref(), Some("Ana Lima"));

        let loaded = accounts.current_profile(Some(first.id)).await.unwrap().unwrap();
        assert_eq!(loaded.display_name(), "Ana Lima");
        assert_eq!(loaded.initial(), "A");
    }

    /// Fails the first `upsert_profile` calls with a unique-key conflict.
    struct RacingSignIn {
        inner: InMemoryBackend,
        conflicts_left: std::sync::Mutex<u32>,
    }

    impl RacingSignIn {
        fn new(conflicts: u32) -> Self {
            Self {
                inner: InMemoryBackend::new(),
                conflicts_left: std::sync::Mutex::new(conflicts),
            }
        }
    }

    #[async_trait::async_trait]
    impl PollBackend for RacingSignIn {
        async fn list_polls(&self, filter: PollFilter) -> Result<Vec<Poll>, BackendError> {
            self.inner.list_polls(filter).await
        }

        async fn find_poll(&self, id: Uuid) -> Result<Option<Poll>, BackendError> {
            self.inner.find_poll(id).await
        }

        async fn create_poll(&self, creator_id: Uuid, poll: NewPoll) -> Result<Poll, BackendError> {
            self.inner.create_poll(creator_id, poll).await
        }

        async fn insert_vote(&self, vote: NewVote) -> Result<Vote, BackendError> {
            self.inner.insert_vote(vote).await
        }

        async fn upsert_profile(&self, identity: Identity) -> Result<Profile, BackendError> {
            {
                let mut left = self.conflicts_left.lock().unwrap();
                if *left > 0 {
                    *left -= 1;
                    return Err(BackendError::Conflict("profiles_provider_id_key".to_string()));
                }
            }
            self.inner.upsert_profile(identity).await
        }

        async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, BackendError> {
            self.inner.find_profile(id).await
        }
    }

    #[tokio::test]
    async fn test_sign_in_race_retries() {
        let accounts = AccountService::new(Arc::new(RacingSignIn::new(1)));
        let profile = accounts.sign_in(identity("Ana")).await.unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn test_profile_conflict_is_never_a_vote_conflict() {
        let accounts = AccountService::new(Arc::new(RacingSignIn::new(2)));
        let err = accounts.sign_in(identity("Ana")).await.unwrap_err();
        assert!(matches!(err, AppError::Backend(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_signed_out_has_no_profile() {
        let accounts = AccountService::new(Arc::new(InMemoryBackend::new()));
        assert_eq!(accounts.current_profile(None).await.unwrap(), None);
        assert_eq!(accounts.current_profile(Some(Uuid::new_v4())).await.unwrap(), None);
    }
}
