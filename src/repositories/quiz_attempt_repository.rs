use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::QuizAttempt};

#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the attempt is completed and another
    /// completed attempt for the same (user, quiz) is already stored.
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn find_completed(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<QuizAttempt>>;
    /// Flips every completed attempt for (user, quiz) to history. Returns how
    /// many were changed.
    async fn demote_completed(&self, user_id: &str, quiz_id: &str) -> AppResult<u64>;
    /// Marks one attempt completed again. Fails with `AlreadyExists` when
    /// another completed attempt took its place meanwhile.
    async fn promote(&self, user_id: &str, id: &str) -> AppResult<bool>;
    /// Newest completion first.
    async fn find_by_user_and_quiz(&self, user_id: &str, quiz_id: &str) -> AppResult<Vec<QuizAttempt>>;
    async fn delete_by_quiz_ids(&self, user_id: &str, quiz_ids: &[String]) -> AppResult<u64>;
}

pub struct MongoQuizAttemptRepository {
    collection: Collection<QuizAttempt>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_attempts");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // At most one completed attempt per (user, quiz).
        let completed_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "completed": true })
                    .name("user_quiz_completed_unique".to_string())
                    .build(),
            )
            .build();

        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1, "completed_at": -1 })
            .options(IndexOptions::builder().name("user_quiz".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(completed_index).await?;
        self.collection.create_index(user_quiz_index).await?;

        log::info!("Successfully created indexes for quiz_attempts collection");
        Ok(())
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_completed(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempt = self
            .collection
            .find_one(doc! {
                "user_id": user_id,
                "quiz_id": quiz_id,
                "completed": true
            })
            .await?;
        Ok(attempt)
    }

    async fn demote_completed(&self, user_id: &str, quiz_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .update_many(
                doc! {
                    "user_id": user_id,
                    "quiz_id": quiz_id,
                    "completed": true
                },
                doc! { "$set": { "completed": false } },
            )
            .await?;
        Ok(result.modified_count)
    }

    async fn promote(&self, user_id: &str, id: &str) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id, "user_id": user_id },
                doc! { "$set": { "completed": true } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn find_by_user_and_quiz(&self, user_id: &str, quiz_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let mut attempts: Vec<QuizAttempt> = self
            .collection
            .find(doc! {
                "user_id": user_id,
                "quiz_id": quiz_id
            })
            .await?
            .try_collect()
            .await?;

        attempts.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(attempts)
    }

    async fn delete_by_quiz_ids(&self, user_id: &str, quiz_ids: &[String]) -> AppResult<u64> {
        if quiz_ids.is_empty() {
            return Ok(0);
        }

        let result = self
            .collection
            .delete_many(doc! {
                "user_id": user_id,
                "quiz_id": { "$in": quiz_ids.to_vec() }
            })
            .await?;
        Ok(result.deleted_count)
    }
}
