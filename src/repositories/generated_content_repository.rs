use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{ContentKind, GeneratedContent},
};

#[async_trait]
pub trait GeneratedContentRepository: Send + Sync {
    async fn find_for(
        &self,
        user_id: &str,
        material_id: &str,
        kind: ContentKind,
    ) -> AppResult<Option<GeneratedContent>>;
    /// Inserts or replaces the record for (user, material, kind). An existing
    /// record keeps its id and `created_at`.
    async fn upsert(&self, content: GeneratedContent) -> AppResult<GeneratedContent>;
    async fn find_by_id_for_user(&self, id: &str, user_id: &str) -> AppResult<Option<GeneratedContent>>;
    /// Newest first by creation time.
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<GeneratedContent>>;
    /// The `limit` most recently created records.
    async fn list_recent_by_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<GeneratedContent>>;
    async fn list_for_material(&self, user_id: &str, material_id: &str) -> AppResult<Vec<GeneratedContent>>;
    async fn count_by_kind(&self, user_id: &str, kind: ContentKind) -> AppResult<i64>;
    async fn delete_by_material(&self, user_id: &str, material_id: &str) -> AppResult<u64>;
}

pub struct MongoGeneratedContentRepository {
    collection: Collection<GeneratedContent>,
}

impl MongoGeneratedContentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("generated_contents");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for generated_contents collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let owner_kind_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "material_id": 1, "content_kind": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_material_kind_unique".to_string())
                    .build(),
            )
            .build();

        let recent_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("user_created_at".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(owner_kind_index).await?;
        self.collection.create_index(recent_index).await?;

        log::info!("Successfully created indexes for generated_contents collection");
        Ok(())
    }
}

#[async_trait]
impl GeneratedContentRepository for MongoGeneratedContentRepository {
    async fn find_for(
        &self,
        user_id: &str,
        material_id: &str,
        kind: ContentKind,
    ) -> AppResult<Option<GeneratedContent>> {
        let content = self
            .collection
            .find_one(doc! {
                "user_id": user_id,
                "material_id": material_id,
                "content_kind": kind.as_str(),
            })
            .await?;
        Ok(content)
    }

    async fn upsert(&self, content: GeneratedContent) -> AppResult<GeneratedContent> {
        let filter = doc! {
            "user_id": &content.user_id,
            "material_id": &content.material_id,
            "content_kind": content.content_kind.as_str(),
        };

        self.collection
            .update_one(
                filter.clone(),
                doc! {
                    "$set": {
                        "content": &content.content,
                        "updated_at": to_bson(&content.updated_at)?,
                    },
                    "$setOnInsert": {
                        "id": &content.id,
                        "created_at": to_bson(&content.created_at)?,
                    },
                },
            )
            .upsert(true)
            .await?;

        self.collection
            .find_one(filter)
            .await?
            .ok_or_else(|| AppError::DatabaseError("Generated content vanished after upsert".to_string()))
    }

    async fn find_by_id_for_user(&self, id: &str, user_id: &str) -> AppResult<Option<GeneratedContent>> {
        let content = self
            .collection
            .find_one(doc! { "id": id, "user_id": user_id })
            .await?;
        Ok(content)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<GeneratedContent>> {
        let mut contents: Vec<GeneratedContent> = self
            .collection
            .find(doc! { "user_id": user_id })
            .await?
            .try_collect()
            .await?;

        contents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contents)
    }

    async fn list_recent_by_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<GeneratedContent>> {
        let contents = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(contents)
    }

    async fn list_for_material(&self, user_id: &str, material_id: &str) -> AppResult<Vec<GeneratedContent>> {
        let contents = self
            .collection
            .find(doc! { "user_id": user_id, "material_id": material_id })
            .await?
            .try_collect()
            .await?;
        Ok(contents)
    }

    async fn count_by_kind(&self, user_id: &str, kind: ContentKind) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "user_id": user_id, "content_kind": kind.as_str() })
            .await?;
        Ok(count as i64)
    }

    async fn delete_by_material(&self, user_id: &str, material_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "user_id": user_id, "material_id": material_id })
            .await?;
        Ok(result.deleted_count)
    }
}
