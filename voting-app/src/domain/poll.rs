use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub options: Vec<PollOption>,
    pub votes: Vec<Vote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: Uuid,
    pub poll_id: Uuid,
    pub text: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    pub poll_id: Uuid,
    pub option_id: Uuid,
    pub user_id: Option<Uuid>,
    pub reason: Option<String>,
    pub weight: i32,
    pub created_at: DateTime<Utc>,
}

impl Poll {
    /// True once `now` is strictly past the expiry. Polls without one never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }

    pub fn has_option(&self, option_id: Uuid) -> bool {
        self.options.iter().any(|option| option.id == option_id)
    }

    /// The vote cast by `user_id` in this poll, if any.
    pub fn vote_of(&self, user_id: Uuid) -> Option<&Vote> {
        self.votes.iter().find(|vote| vote.user_id == Some(user_id))
    }

    pub fn has_voted(&self, user_id: Option<Uuid>) -> bool {
        user_id.is_some_and(|id| self.vote_of(id).is_some())
    }
}
