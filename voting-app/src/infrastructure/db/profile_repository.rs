use super::entities::{profile, Profile};
use crate::domain::{self, Identity};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<domain::Profile>, DbErr> {
        Ok(Profile::find_by_id(id).one(&self.db).await?.map(to_domain))
    }

    pub async fn find_by_provider_id(&self, provider_id: &str) -> Result<Option<profile::Model>, DbErr> {
        Profile::find()
            .filter(profile::Column::ProviderId.eq(provider_id))
            .one(&self.db)
            .await
    }

    pub async fn upsert(&self, identity: Identity) -> Result<domain::Profile, DbErr> {
        let model = if let Some(existing) = self.find_by_provider_id(&identity.provider_id).await? {
            let mut active: profile::ActiveModel = existing.into();
            active.email = Set(identity.email);
            active.name = Set(identity.name);
            active.avatar_url = Set(identity.avatar_url);
            active.updated_at = Set(Some(chrono::Utc::now()));
            active.update(&self.db).await?
        } else {
            let fresh = domain::Profile::new(identity);
            let active = profile::ActiveModel {
                id: Set(fresh.id),
                provider_id: Set(fresh.provider_id),
                email: Set(fresh.email),
                name: Set(fresh.name),
                avatar_url: Set(fresh.avatar_url),
                created_at: Set(Some(chrono::Utc::now())),
                updated_at: Set(Some(chrono::Utc::now())),
            };
            active.insert(&self.db).await?
        };
        Ok(to_domain(model))
    }
}

fn to_domain(model: profile::Model) -> domain::Profile {
    domain::Profile {
        id: model.id,
        provider_id: model.provider_id,
        email: model.email,
        name: model.name,
        avatar_url: model.avatar_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
