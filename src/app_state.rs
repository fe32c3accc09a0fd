use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        GeneratedContentRepository, MaterialRepository, MongoGeneratedContentRepository,
        MongoMaterialRepository, MongoQuizAttemptRepository, MongoQuizRepository,
        MongoUserProfileRepository, QuizAttemptRepository, QuizRepository, UserProfileRepository,
    },
    services::{
        content_generation_service::ContentGenerationService,
        material_service::MaterialService,
        model_service::{ModelClient, OpenAiModelClient},
        quiz_lifecycle_service::QuizLifecycleService,
        stats_service::StatsService,
        study_content_service::StudyContentService,
    },
};

/// Storage behind the services.
#[derive(Clone)]
pub struct Repositories {
    pub materials: Arc<dyn MaterialRepository>,
    pub contents: Arc<dyn GeneratedContentRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub attempts: Arc<dyn QuizAttemptRepository>,
    pub profiles: Arc<dyn UserProfileRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub material_service: Arc<MaterialService>,
    pub study_content_service: Arc<StudyContentService>,
    pub quiz_lifecycle_service: Arc<QuizLifecycleService>,
    pub stats_service: Arc<StatsService>,
    pub jwt_service: Arc<JwtService>,
    /// Absent when the state is assembled over non-Mongo repositories.
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let materials = Arc::new(MongoMaterialRepository::new(&db));
        materials.ensure_indexes().await?;
        let contents = Arc::new(MongoGeneratedContentRepository::new(&db));
        contents.ensure_indexes().await?;
        let quizzes = Arc::new(MongoQuizRepository::new(&db));
        quizzes.ensure_indexes().await?;
        let attempts = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempts.ensure_indexes().await?;
        let profiles = Arc::new(MongoUserProfileRepository::new(&db));
        profiles.ensure_indexes().await?;

        let repositories = Repositories {
            materials,
            contents,
            quizzes,
            attempts,
            profiles,
        };
        let model = Arc::new(OpenAiModelClient::new(&config));

        Ok(Self::from_parts(config, repositories, model, Some(db)))
    }

    pub fn from_parts(
        config: Config,
        repositories: Repositories,
        model: Arc<dyn ModelClient>,
        db: Option<Database>,
    ) -> Self {
        let Repositories {
            materials,
            contents,
            quizzes,
            attempts,
            profiles,
        } = repositories;

        let generator = Arc::new(ContentGenerationService::new(model));

        let material_service = Arc::new(MaterialService::new(
            materials.clone(),
            contents.clone(),
            quizzes.clone(),
            attempts.clone(),
        ));
        let study_content_service = Arc::new(StudyContentService::new(
            generator,
            materials.clone(),
            contents.clone(),
            quizzes.clone(),
            profiles.clone(),
        ));
        let quiz_lifecycle_service = Arc::new(QuizLifecycleService::new(
            quizzes.clone(),
            attempts,
            profiles.clone(),
        ));
        let stats_service = Arc::new(StatsService::new(materials, contents, quizzes, profiles));
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_expiration_hours));

        Self {
            material_service,
            study_content_service,
            quiz_lifecycle_service,
            stats_service,
            jwt_service,
            db,
            config: Arc::new(config),
        }
    }
}
