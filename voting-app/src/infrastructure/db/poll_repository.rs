use super::entities::{poll, poll_option, vote, Poll, PollOption, Vote};
use crate::application::PollFilter;
use crate::domain::{self, NewPoll};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, TransactionTrait};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct PollRepository {
    db: DatabaseConnection,
}

impl PollRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: PollFilter) -> Result<Vec<domain::Poll>, DbErr> {
        let query = match filter {
            PollFilter::Active => Poll::find().filter(poll::Column::IsActive.eq(true)),
            PollFilter::CreatedBy(creator) => Poll::find().filter(poll::Column::CreatorId.eq(creator)),
        };

        let polls = query
            .order_by_desc(poll::Column::CreatedAt)
            .all(&self.db)
            .await?;

        self.load_children(polls).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<domain::Poll>, DbErr> {
        let Some(model) = Poll::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(self.load_children(vec![model]).await?.pop())
    }

    /// Inserts the poll and its options in one transaction.
    pub async fn create(&self, creator_id: Uuid, new_poll: NewPoll) -> Result<domain::Poll, DbErr> {
        let now = chrono::Utc::now();
        let poll_id = Uuid::new_v4();

        let txn = self.db.begin().await?;

        let poll_model = poll::ActiveModel {
            id: Set(poll_id),
            title: Set(new_poll.title),
            description: Set(new_poll.description),
            creator_id: Set(creator_id),
            created_at: Set(now),
            updated_at: Set(now),
            expires_at: Set(new_poll.expires_at),
            is_active: Set(true),
        }
        .insert(&txn)
        .await?;

        let option_models: Vec<poll_option::Model> = new_poll
            .options
            .into_iter()
            .enumerate()
            .map(|(position, text)| poll_option::Model {
                id: Uuid::new_v4(),
                poll_id,
                text,
                position: position as i32,
                created_at: now,
            })
            .collect();

        PollOption::insert_many(
            option_models
                .iter()
                .cloned()
                .map(poll_option::ActiveModel::from),
        )
        .exec(&txn)
        .await?;

        txn.commit().await?;

        Ok(to_domain(poll_model, option_models, Vec::new()))
    }

    async fn load_children(&self, polls: Vec<poll::Model>) -> Result<Vec<domain::Poll>, DbErr> {
        if polls.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = polls.iter().map(|p| p.id).collect();

        let options = PollOption::find()
            .filter(poll_option::Column::PollId.is_in(ids.clone()))
            .order_by_asc(poll_option::Column::Position)
            .all(&self.db)
            .await?;

        let votes = Vote::find()
            .filter(vote::Column::PollId.is_in(ids))
            .order_by_asc(vote::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut options_by_poll: HashMap<Uuid, Vec<poll_option::Model>> = HashMap::new();
        for option in options {
            options_by_poll.entry(option.poll_id).or_default().push(option);
        }
        let mut votes_by_poll: HashMap<Uuid, Vec<vote::Model>> = HashMap::new();
        for v in votes {
            votes_by_poll.entry(v.poll_id).or_default().push(v);
        }

        Ok(polls
            .into_iter()
            .map(|p| {
                let options = options_by_poll.remove(&p.id).unwrap_or_default();
                let votes = votes_by_poll.remove(&p.id).unwrap_or_default();
                to_domain(p, options, votes)
            })
            .collect())
    }
}

fn to_domain(
    model: poll::Model,
    options: Vec<poll_option::Model>,
    votes: Vec<vote::Model>,
) -> domain::Poll {
    domain::Poll {
        id: model.id,
        title: model.title,
        description: model.description,
        creator_id: model.creator_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
        expires_at: model.expires_at,
        is_active: model.is_active,
        options: options
            .into_iter()
            .map(|o| domain::PollOption {
                id: o.id,
                poll_id: o.poll_id,
                text: o.text,
                position: o.position,
                created_at: o.created_at,
            })
            .collect(),
        votes: votes.into_iter().map(super::vote_repository::to_domain).collect(),
    }
}
