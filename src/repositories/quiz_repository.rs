use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Quiz};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id_for_user(&self, id: &str, user_id: &str) -> AppResult<Option<Quiz>>;
    /// Newest first.
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>>;
    async fn count_by_user(&self, user_id: &str) -> AppResult<i64>;
    /// Removes the material's quizzes and returns their ids.
    async fn delete_by_material(&self, user_id: &str, material_id: &str) -> AppResult<Vec<String>>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_material_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "material_id": 1 })
            .options(IndexOptions::builder().name("user_material".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_material_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id_for_user(&self, id: &str, user_id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self
            .collection
            .find_one(doc! { "id": id, "user_id": user_id })
            .await?;
        Ok(quiz)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        let mut quizzes: Vec<Quiz> = self
            .collection
            .find(doc! { "user_id": user_id })
            .await?
            .try_collect()
            .await?;

        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quizzes)
    }

    async fn count_by_user(&self, user_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "user_id": user_id })
            .await?;
        Ok(count as i64)
    }

    async fn delete_by_material(&self, user_id: &str, material_id: &str) -> AppResult<Vec<String>> {
        let filter = doc! { "user_id": user_id, "material_id": material_id };

        let quizzes: Vec<Quiz> = self
            .collection
            .find(filter.clone())
            .await?
            .try_collect()
            .await?;

        self.collection.delete_many(filter).await?;
        Ok(quizzes.into_iter().map(|q| q.id).collect())
    }
}
