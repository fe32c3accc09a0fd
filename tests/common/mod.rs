#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use learnai_server::{
    app_state::{AppState, Repositories},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        ContentKind, GeneratedContent, ProfileCounter, Quiz, QuizAttempt, QuizQuestion,
        StudyMaterial, UserProfile,
    },
    repositories::{
        GeneratedContentRepository, MaterialRepository, QuizAttemptRepository, QuizRepository,
        UserProfileRepository,
    },
    services::model_service::ModelClient,
};

pub const USER_ID: &str = "user-1";
pub const OTHER_USER_ID: &str = "user-2";
pub const MATERIAL_TEXT: &str = "Photosynthesis converts light to chemical energy.";

#[derive(Default)]
pub struct InMemoryMaterialRepository {
    materials: Arc<RwLock<HashMap<String, StudyMaterial>>>,
}

#[async_trait]
impl MaterialRepository for InMemoryMaterialRepository {
    async fn create(&self, material: StudyMaterial) -> AppResult<StudyMaterial> {
        let mut materials = self.materials.write().await;
        if materials.contains_key(&material.id) {
            return Err(AppError::AlreadyExists(format!(
                "Material with id '{}' already exists",
                material.id
            )));
        }
        materials.insert(material.id.clone(), material.clone());
        Ok(material)
    }

    async fn find_by_id_for_user(&self, id: &str, user_id: &str) -> AppResult<Option<StudyMaterial>> {
        let materials = self.materials.read().await;
        Ok(materials.get(id).filter(|m| m.user_id == user_id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<StudyMaterial>> {
        let materials = self.materials.read().await;
        let mut items: Vec<_> = materials
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(items)
    }

    async fn list_recent_by_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<StudyMaterial>> {
        let mut items = self.list_by_user(user_id).await?;
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }

    async fn delete_for_user(&self, id: &str, user_id: &str) -> AppResult<bool> {
        let mut materials = self.materials.write().await;
        match materials.get(id) {
            Some(m) if m.user_id == user_id => {
                materials.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count_by_user(&self, user_id: &str) -> AppResult<i64> {
        let materials = self.materials.read().await;
        Ok(materials.values().filter(|m| m.user_id == user_id).count() as i64)
    }
}

/// Keyed like the unique (user, material, kind) index.
#[derive(Default)]
pub struct InMemoryGeneratedContentRepository {
    contents: Arc<RwLock<HashMap<(String, String, ContentKind), GeneratedContent>>>,
}

impl InMemoryGeneratedContentRepository {
    pub async fn all(&self) -> Vec<GeneratedContent> {
        self.contents.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl GeneratedContentRepository for InMemoryGeneratedContentRepository {
    async fn find_for(
        &self,
        user_id: &str,
        material_id: &str,
        kind: ContentKind,
    ) -> AppResult<Option<GeneratedContent>> {
        let contents = self.contents.read().await;
        Ok(contents
            .get(&(user_id.to_string(), material_id.to_string(), kind))
            .cloned())
    }

    async fn upsert(&self, content: GeneratedContent) -> AppResult<GeneratedContent> {
        let mut contents = self.contents.write().await;
        let key = (
            content.user_id.clone(),
            content.material_id.clone(),
            content.content_kind,
        );

        let stored = match contents.get(&key) {
            Some(existing) => GeneratedContent {
                id: existing.id.clone(),
                created_at: existing.created_at,
                ..content
            },
            None => content,
        };
        contents.insert(key, stored.clone());
        Ok(stored)
    }

    async fn find_by_id_for_user(&self, id: &str, user_id: &str) -> AppResult<Option<GeneratedContent>> {
        let contents = self.contents.read().await;
        Ok(contents
            .values()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<GeneratedContent>> {
        let contents = self.contents.read().await;
        let mut items: Vec<_> = contents
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn list_recent_by_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<GeneratedContent>> {
        let mut items = self.list_by_user(user_id).await?;
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }

    async fn list_for_material(&self, user_id: &str, material_id: &str) -> AppResult<Vec<GeneratedContent>> {
        let contents = self.contents.read().await;
        Ok(contents
            .values()
            .filter(|c| c.user_id == user_id && c.material_id == material_id)
            .cloned()
            .collect())
    }

    async fn count_by_kind(&self, user_id: &str, kind: ContentKind) -> AppResult<i64> {
        let contents = self.contents.read().await;
        Ok(contents
            .values()
            .filter(|c| c.user_id == user_id && c.content_kind == kind)
            .count() as i64)
    }

    async fn delete_by_material(&self, user_id: &str, material_id: &str) -> AppResult<u64> {
        let mut contents = self.contents.write().await;
        let before = contents.len();
        contents.retain(|_, c| !(c.user_id == user_id && c.material_id == material_id));
        Ok((before - contents.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub async fn all(&self) -> Vec<Quiz> {
        self.quizzes.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id_for_user(&self, id: &str, user_id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).filter(|q| q.user_id == user_id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn count_by_user(&self, user_id: &str) -> AppResult<i64> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.values().filter(|q| q.user_id == user_id).count() as i64)
    }

    async fn delete_by_material(&self, user_id: &str, material_id: &str) -> AppResult<Vec<String>> {
        let mut quizzes = self.quizzes.write().await;
        let ids: Vec<String> = quizzes
            .values()
            .filter(|q| q.user_id == user_id && q.material_id.as_deref() == Some(material_id))
            .map(|q| q.id.clone())
            .collect();
        for id in &ids {
            quizzes.remove(id);
        }
        Ok(ids)
    }
}

/// Mirrors the partial unique index on completed attempts.
#[derive(Default)]
pub struct InMemoryQuizAttemptRepository {
    attempts: Arc<RwLock<HashMap<String, QuizAttempt>>>,
    create_failure: Mutex<Option<AppError>>,
}

impl InMemoryQuizAttemptRepository {
    /// Every later `create` fails with `error` without storing anything.
    pub fn fail_creates_with(&self, error: AppError) {
        *self.create_failure.lock().unwrap() = Some(error);
    }

    pub async fn all(&self) -> Vec<QuizAttempt> {
        self.attempts.read().await.values().cloned().collect()
    }

    pub async fn completed_count(&self, user_id: &str, quiz_id: &str) -> usize {
        self.attempts
            .read()
            .await
            .values()
            .filter(|a| a.user_id == user_id && a.quiz_id == quiz_id && a.completed)
            .count()
    }
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        let failure = self.create_failure.lock().unwrap().clone();
        if let Some(error) = failure {
            return Err(error);
        }
        let mut attempts = self.attempts.write().await;
        let duplicate = attempt.completed
            && attempts.values().any(|a| {
                a.completed && a.user_id == attempt.user_id && a.quiz_id == attempt.quiz_id
            });
        if duplicate || attempts.contains_key(&attempt.id) {
            return Err(AppError::AlreadyExists("Duplicate key".to_string()));
        }
        attempts.insert(attempt.id.clone(), attempt.clone());
        Ok(attempt)
    }

    async fn find_completed(&self, user_id: &str, quiz_id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .values()
            .find(|a| a.user_id == user_id && a.quiz_id == quiz_id && a.completed)
            .cloned())
    }

    async fn demote_completed(&self, user_id: &str, quiz_id: &str) -> AppResult<u64> {
        let mut attempts = self.attempts.write().await;
        let mut changed = 0;
        for attempt in attempts
            .values_mut()
            .filter(|a| a.user_id == user_id && a.quiz_id == quiz_id && a.completed)
        {
            attempt.completed = false;
            changed += 1;
        }
        Ok(changed)
    }

    async fn promote(&self, user_id: &str, id: &str) -> AppResult<bool> {
        let mut attempts = self.attempts.write().await;
        let Some(quiz_id) = attempts
            .get(id)
            .filter(|a| a.user_id == user_id)
            .map(|a| a.quiz_id.clone())
        else {
            return Ok(false);
        };

        let taken = attempts
            .values()
            .any(|a| a.id != id && a.completed && a.user_id == user_id && a.quiz_id == quiz_id);
        if taken {
            return Err(AppError::AlreadyExists("Duplicate key".to_string()));
        }

        if let Some(attempt) = attempts.get_mut(id) {
            attempt.completed = true;
        }
        Ok(true)
    }

    async fn find_by_user_and_quiz(&self, user_id: &str, quiz_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        let mut items: Vec<_> = attempts
            .values()
            .filter(|a| a.user_id == user_id && a.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(items)
    }

    async fn delete_by_quiz_ids(&self, user_id: &str, quiz_ids: &[String]) -> AppResult<u64> {
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|_, a| !(a.user_id == user_id && quiz_ids.contains(&a.quiz_id)));
        Ok((before - attempts.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryUserProfileRepository {
    profiles: Arc<RwLock<HashMap<String, UserProfile>>>,
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn increment(&self, user_id: &str, counter: ProfileCounter) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        profiles
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::new(user_id))
            .increment(counter);
        Ok(())
    }
}

/// Model double returning a canned reply and recording prompts.
pub struct StubModelClient {
    reply: Result<String, AppError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubModelClient {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err(AppError::ModelInvocationFailed("upstream unavailable".to_string())),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ModelClient for StubModelClient {
    async fn generate_content(&self, prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

/// Application state over in-memory storage, with handles for inspection.
pub struct TestContext {
    pub materials: Arc<InMemoryMaterialRepository>,
    pub contents: Arc<InMemoryGeneratedContentRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub attempts: Arc<InMemoryQuizAttemptRepository>,
    pub profiles: Arc<InMemoryUserProfileRepository>,
    pub model: Arc<StubModelClient>,
    pub state: AppState,
}

impl TestContext {
    pub fn new(model: StubModelClient) -> Self {
        let materials = Arc::new(InMemoryMaterialRepository::default());
        let contents = Arc::new(InMemoryGeneratedContentRepository::default());
        let quizzes = Arc::new(InMemoryQuizRepository::default());
        let attempts = Arc::new(InMemoryQuizAttemptRepository::default());
        let profiles = Arc::new(InMemoryUserProfileRepository::default());
        let model = Arc::new(model);

        let repositories = Repositories {
            materials: materials.clone(),
            contents: contents.clone(),
            quizzes: quizzes.clone(),
            attempts: attempts.clone(),
            profiles: profiles.clone(),
        };
        let state = AppState::from_parts(test_config(), repositories, model.clone(), None);

        Self {
            materials,
            contents,
            quizzes,
            attempts,
            profiles,
            model,
            state,
        }
    }

    pub async fn seed_material(&self, user_id: &str, title: &str, text: Option<&str>) -> StudyMaterial {
        let material =
            StudyMaterial::new(user_id, title, "notes.pdf", text.map(str::to_string)).unwrap();
        self.materials.create(material).await.unwrap()
    }

    /// A quiz with `n` questions whose correct option is always "A".
    pub async fn seed_quiz(&self, user_id: &str, material_id: &str, n: usize) -> Quiz {
        let questions = (1..=n)
            .map(|i| QuizQuestion {
                question_text: format!("Question {}", i),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                answer: "A".to_string(),
            })
            .collect();
        let quiz = Quiz::from_generated(user_id, material_id, "Biology", questions);
        self.quizzes.create(quiz).await.unwrap()
    }
}

pub fn test_config() -> Config {
    let mut config = Config::from_env();
    config.jwt_secret = "integration_test_jwt_secret_value".to_string().into();
    config.jwt_expiration_hours = 1;
    config
}
