use crate::application::{BackendError, PollBackend, PollFilter};
use crate::domain::{Identity, NewPoll, NewVote, Poll, PollOption, Profile, Vote};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    polls: Vec<Poll>,
    profiles: Vec<Profile>,
}

/// Process-local backend for tests and for running without a database.
#[derive(Default)]
pub struct InMemoryBackend {
    tables: RwLock<Tables>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, BackendError> {
        self.tables
            .read()
            .map_err(|_| BackendError::Unavailable("in-memory store poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, BackendError> {
        self.tables
            .write()
            .map_err(|_| BackendError::Unavailable("in-memory store poisoned".to_string()))
    }

    #[cfg(test)]
    pub(crate) fn poll_count(&self) -> usize {
        self.tables.read().map(|t| t.polls.len()).unwrap_or_default()
    }
}

#[async_trait]
impl PollBackend for InMemoryBackend {
    async fn list_polls(&self, filter: PollFilter) -> Result<Vec<Poll>, BackendError> {
        let tables = self.read()?;
        let mut polls: Vec<Poll> = tables
            .polls
            .iter()
            .filter(|poll| match filter {
                PollFilter::Active => poll.is_active,
                PollFilter::CreatedBy(creator) => poll.creator_id == creator,
            })
            .cloned()
            .collect();
        // Stable sort, so same-instant polls keep newest-inserted first.
        polls.reverse();
        polls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(polls)
    }

    async fn find_poll(&self, id: Uuid) -> Result<Option<Poll>, BackendError> {
        Ok(self.read()?.polls.iter().find(|poll| poll.id == id).cloned())
    }

    async fn create_poll(&self, creator_id: Uuid, poll: NewPoll) -> Result<Poll, BackendError> {
        let now = Utc::now();
        let poll_id = Uuid::new_v4();
        let created = Poll {
            id: poll_id,
            title: poll.title,
            description: poll.description,
            creator_id,
            created_at: now,
            updated_at: now,
            expires_at: poll.expires_at,
            is_active: true,
            options: poll
                .options
                .into_iter()
                .enumerate()
                .map(|(position, text)| PollOption {
                    id: Uuid::new_v4(),
                    poll_id,
                    text,
                    position: position as i32,
                    created_at: now,
                })
                .collect(),
            votes: Vec::new(),
        };

        self.write()?.polls.push(created.clone());
        Ok(created)
    }

    async fn insert_vote(&self, vote: NewVote) -> Result<Vote, BackendError> {
        let mut tables = self.write()?;
        let poll = tables
            .polls
            .iter_mut()
            .find(|poll| poll.id == vote.poll_id)
            .ok_or_else(|| BackendError::Unavailable(format!("poll {} does not exist", vote.poll_id)))?;

        if !poll.has_option(vote.option_id) {
            return Err(BackendError::Unavailable(format!(
                "option {} does not exist",
                vote.option_id
            )));
        }
        if poll.has_voted(Some(vote.user_id)) {
            return Err(BackendError::Conflict("votes_poll_id_user_id_key".to_string()));
        }

        let stored = Vote {
            id: Uuid::new_v4(),
            poll_id: vote.poll_id,
            option_id: vote.option_id,
            user_id: Some(vote.user_id),
            reason: vote.reason,
            weight: vote.weight,
            created_at: Utc::now(),
        };
        poll.votes.push(stored.clone());
        Ok(stored)
    }

    async fn upsert_profile(&self, identity: Identity) -> Result<Profile, BackendError> {
        let mut tables = self.write()?;
        let now = Some(Utc::now());

        if let Some(existing) = tables
            .profiles
            .iter_mut()
            .find(|profile| profile.provider_id == identity.provider_id)
        {
            existing.email = identity.email;
            existing.name = identity.name;
            existing.avatar_url = identity.avatar_url;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let mut profile = Profile::new(identity);
        profile.created_at = now;
        profile.updated_at = now;
        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, BackendError> {
        Ok(self.read()?.profiles.iter().find(|p| p.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_poll(title: &str) -> NewPoll {
        NewPoll {
            title: title.to_string(),
            description: None,
            options: vec!["a".to_string(), "b".to_string()],
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_and_filtered() {
        let backend = InMemoryBackend::new();
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
        backend.create_poll(alice, new_poll("first")).await.unwrap();
        backend.create_poll(bob, new_poll("second")).await.unwrap();
        backend.create_poll(alice, new_poll("third")).await.unwrap();

        let active = backend.list_polls(PollFilter::Active).await.unwrap();
        let titles: Vec<&str> = active.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);

        let mine = backend.list_polls(PollFilter::CreatedBy(alice)).await.unwrap();
        let titles: Vec<&str> = mine.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "first"]);
    }

    #[tokio::test]
    async fn test_options_keep_positions() {
        let backend = InMemoryBackend::new();
        let poll = backend.create_poll(Uuid::new_v4(), new_poll("p")).await.unwrap();
        let positions: Vec<i32> = poll.options.iter().map(|o| o.position).collect();
        assert_eq!(positions, vec![0, 1]);
        assert!(poll.options.iter().all(|o| o.poll_id == poll.id));
    }

    #[tokio::test]
    async fn test_duplicate_vote_is_conflict() {
        let backend = InMemoryBackend::new();
        let poll = backend.create_poll(Uuid::new_v4(), new_poll("p")).await.unwrap();
        let vote = NewVote {
            poll_id: poll.id,
            option_id: poll.options[0].id,
            user_id: Uuid::new_v4(),
            reason: None,
            weight: 1,
        };

        backend.insert_vote(vote.clone()).await.unwrap();
        let err = backend.insert_vote(vote).await.unwrap_err();
        assert!(matches!(err, BackendError::Conflict(_)));

        let stored = backend.find_poll(poll.id).await.unwrap().unwrap();
        assert_eq!(stored.votes.len(), 1);
    }
}
