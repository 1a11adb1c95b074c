pub mod entities;
mod poll_repository;
mod profile_repository;
mod vote_repository;

pub use poll_repository::PollRepository;
pub use profile_repository::ProfileRepository;
pub use vote_repository::VoteRepository;

use crate::application::{BackendError, PollBackend, PollFilter};
use crate::domain::{Identity, NewPoll, NewVote, Poll, Profile, Vote};
use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::time::Duration;
use uuid::Uuid;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let migration = include_str!("../../../../migrations/001_initial.sql");

    for statement in migration.split(';') {
        let statement = statement.trim();
        if !statement.is_empty() {
            db.execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                statement.to_string(),
            ))
            .await?;
        }
    }

    tracing::info!("Database schema is up to date");
    Ok(())
}

/// PostgreSQL storage behind the [`PollBackend`] seam.
#[derive(Clone)]
pub struct PostgresBackend {
    polls: PollRepository,
    votes: VoteRepository,
    profiles: ProfileRepository,
}

impl PostgresBackend {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            polls: PollRepository::new(db.clone()),
            votes: VoteRepository::new(db.clone()),
            profiles: ProfileRepository::new(db),
        }
    }
}

fn backend_error(err: DbErr) -> BackendError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => BackendError::Conflict(detail),
        _ => BackendError::Unavailable(err.to_string()),
    }
}

#[async_trait]
impl PollBackend for PostgresBackend {
    async fn list_polls(&self, filter: PollFilter) -> Result<Vec<Poll>, BackendError> {
        self.polls.list(filter).await.map_err(backend_error)
    }

    async fn find_poll(&self, id: Uuid) -> Result<Option<Poll>, BackendError> {
        self.polls.find_by_id(id).await.map_err(backend_error)
    }

    async fn create_poll(&self, creator_id: Uuid, poll: NewPoll) -> Result<Poll, BackendError> {
        self.polls.create(creator_id, poll).await.map_err(backend_error)
    }

    async fn insert_vote(&self, vote: NewVote) -> Result<Vote, BackendError> {
        self.votes.create(vote).await.map_err(backend_error)
    }

    async fn upsert_profile(&self, identity: Identity) -> Result<Profile, BackendError> {
        self.profiles.upsert(identity).await.map_err(backend_error)
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, BackendError> {
        self.profiles.find_by_id(id).await.map_err(backend_error)
    }
}
