use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::StudyMaterial};

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn create(&self, material: StudyMaterial) -> AppResult<StudyMaterial>;
    async fn find_by_id_for_user(&self, id: &str, user_id: &str) -> AppResult<Option<StudyMaterial>>;
    /// Newest upload first.
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<StudyMaterial>>;
    /// The `limit` newest uploads.
    async fn list_recent_by_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<StudyMaterial>>;
    async fn delete_for_user(&self, id: &str, user_id: &str) -> AppResult<bool>;
    async fn count_by_user(&self, user_id: &str) -> AppResult<i64>;
}

pub struct MongoMaterialRepository {
    collection: Collection<StudyMaterial>,
}

impl MongoMaterialRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("study_materials");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for study_materials collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "uploaded_at": -1 })
            .options(IndexOptions::builder().name("user_uploaded_at".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_id_index).await?;

        log::info!("Successfully created indexes for study_materials collection");
        Ok(())
    }
}

#[async_trait]
impl MaterialRepository for MongoMaterialRepository {
    async fn create(&self, material: StudyMaterial) -> AppResult<StudyMaterial> {
        self.collection.insert_one(&material).await?;
        Ok(material)
    }

    async fn find_by_id_for_user(&self, id: &str, user_id: &str) -> AppResult<Option<StudyMaterial>> {
        let material = self
            .collection
            .find_one(doc! { "id": id, "user_id": user_id })
            .await?;
        Ok(material)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<StudyMaterial>> {
        let mut materials: Vec<StudyMaterial> = self
            .collection
            .find(doc! { "user_id": user_id })
            .await?
            .try_collect()
            .await?;

        // Timestamps are stored as strings, so order here rather than in the query.
        materials.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(materials)
    }

    async fn list_recent_by_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<StudyMaterial>> {
        // UTC RFC 3339 strings sort in time order.
        let materials = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "uploaded_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(materials)
    }

    async fn delete_for_user(&self, id: &str, user_id: &str) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "id": id, "user_id": user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn count_by_user(&self, user_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "user_id": user_id })
            .await?;
        Ok(count as i64)
    }
}
