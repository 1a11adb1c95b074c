use super::entities::vote;
use crate::domain::{self, NewVote};
use sea_orm::{entity::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct VoteRepository {
    db: DatabaseConnection,
}

impl VoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The `(poll_id, user_id)` unique index rejects a second vote by the same user.
    pub async fn create(&self, new_vote: NewVote) -> Result<domain::Vote, DbErr> {
        let active = vote::ActiveModel {
            id: Set(Uuid::new_v4()),
            poll_id: Set(new_vote.poll_id),
            option_id: Set(new_vote.option_id),
            user_id: Set(Some(new_vote.user_id)),
            reason: Set(new_vote.reason),
            weight: Set(new_vote.weight),
            created_at: Set(chrono::Utc::now()),
        };
        active.insert(&self.db).await.map(to_domain)
    }
}

pub(super) fn to_domain(model: vote::Model) -> domain::Vote {
    domain::Vote {
        id: model.id,
        poll_id: model.poll_id,
        option_id: model.option_id,
        user_id: model.user_id,
        reason: model.reason,
        weight: model.weight,
        created_at: model.created_at,
    }
}
