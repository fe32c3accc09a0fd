use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{ProfileCounter, UserProfile},
};

#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<UserProfile>>;
    /// Adds one to `counter`, creating the profile on first use.
    async fn increment(&self, user_id: &str, counter: ProfileCounter) -> AppResult<()>;
}

pub struct MongoUserProfileRepository {
    collection: Collection<UserProfile>,
}

impl MongoUserProfileRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("user_profiles");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for user_profiles collection");

        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(user_id_index).await?;

        log::info!("Successfully created indexes for user_profiles collection");
        Ok(())
    }
}

#[async_trait]
impl UserProfileRepository for MongoUserProfileRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        let profile = self
            .collection
            .find_one(doc! { "user_id": user_id })
            .await?;
        Ok(profile)
    }

    async fn increment(&self, user_id: &str, counter: ProfileCounter) -> AppResult<()> {
        let mut increments = Document::new();
        increments.insert(counter.field_name(), 1_i64);

        self.collection
            .update_one(doc! { "user_id": user_id }, doc! { "$inc": increments })
            .upsert(true)
            .await?;
        Ok(())
    }
}
