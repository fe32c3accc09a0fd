use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{
            generation::stored_content_to_json, ContentKind, GeneratedContent, GeneratedPayload,
            ProfileCounter, Quiz, StudyMaterial,
        },
        dto::{
            request::GenerateContentRequest,
            response::{
                ExistingContent, ExistingContentEntry, GenerateContentResponse, GeneratedContentDto,
            },
        },
    },
    repositories::{
        GeneratedContentRepository, MaterialRepository, QuizRepository, UserProfileRepository,
    },
    services::content_generation_service::ContentGenerationService,
};

/// Generates content for a user's materials and keeps the stored copies.
pub struct StudyContentService {
    generator: Arc<ContentGenerationService>,
    materials: Arc<dyn MaterialRepository>,
    contents: Arc<dyn GeneratedContentRepository>,
    quizzes: Arc<dyn QuizRepository>,
    profiles: Arc<dyn UserProfileRepository>,
}

impl StudyContentService {
    pub fn new(
        generator: Arc<ContentGenerationService>,
        materials: Arc<dyn MaterialRepository>,
        contents: Arc<dyn GeneratedContentRepository>,
        quizzes: Arc<dyn QuizRepository>,
        profiles: Arc<dyn UserProfileRepository>,
    ) -> Self {
        Self {
            generator,
            materials,
            contents,
            quizzes,
            profiles,
        }
    }

    pub async fn generate_for_material(
        &self,
        user_id: &str,
        request: GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        let kind: ContentKind = request.content_type.parse()?;
        request.validate()?;

        let material = self.find_material(user_id, &request.material_id).await?;
        let material_text = material
            .usable_text()
            .ok_or_else(|| AppError::BadRequest("No extracted text available".to_string()))?;

        // Summaries and notes are reused unless a regeneration is asked for.
        if !request.regenerate && !kind.is_structured() {
            if let Some(existing) = self.contents.find_for(user_id, &material.id, kind).await? {
                log::info!("Reusing stored {} {} for material {}", kind, existing.id, material.id);
                return Ok(GenerateContentResponse {
                    content_id: Some(existing.id),
                    quiz_id: None,
                    content_type: kind,
                    content: stored_content_to_json(&existing.content),
                    message: Some("Using previously generated content".to_string()),
                });
            }
        }

        let result = self.generator.generate_kind(material_text, kind).await?;
        let content = result.content_json();

        let stored = self
            .contents
            .upsert(GeneratedContent::new(
                user_id,
                &material.id,
                kind,
                result.stored_content(),
            ))
            .await?;

        match result.payload {
            GeneratedPayload::Quiz(questions) => {
                let quiz = self
                    .quizzes
                    .create(Quiz::from_generated(user_id, &material.id, &material.title, questions))
                    .await?;

                log::info!("Created quiz {} with {} questions", quiz.id, quiz.questions.len());
                Ok(GenerateContentResponse {
                    content_id: None,
                    quiz_id: Some(quiz.id),
                    content_type: kind,
                    content,
                    message: Some("Quiz generated successfully".to_string()),
                })
            }
            _ => {
                if let Some(counter) = counter_for(kind) {
                    self.profiles.increment(user_id, counter).await?;
                }

                Ok(GenerateContentResponse {
                    content_id: Some(stored.id),
                    quiz_id: None,
                    content_type: kind,
                    content,
                    message: None,
                })
            }
        }
    }

    pub async fn list_contents(&self, user_id: &str) -> AppResult<Vec<GeneratedContentDto>> {
        let contents = self.contents.list_by_user(user_id).await?;
        Ok(contents.into_iter().map(GeneratedContentDto::from).collect())
    }

    pub async fn get_content(&self, user_id: &str, id: &str) -> AppResult<GeneratedContentDto> {
        self.contents
            .find_by_id_for_user(id, user_id)
            .await?
            .map(GeneratedContentDto::from)
            .ok_or_else(|| AppError::NotFound("Content not found".to_string()))
    }

    pub async fn existing_content(&self, user_id: &str, material_id: &str) -> AppResult<ExistingContent> {
        let material = self.find_material(user_id, material_id).await?;

        let mut existing = ExistingContent::default();
        for record in self.contents.list_for_material(user_id, &material.id).await? {
            let entry = ExistingContentEntry {
                id: record.id,
                created_at: record.created_at,
                updated_at: record.updated_at,
            };

            match record.content_kind {
                ContentKind::Summary => existing.summary = Some(entry),
                ContentKind::Notes => existing.notes = Some(entry),
                ContentKind::Flashcards | ContentKind::Quiz => {}
            }
        }

        Ok(existing)
    }

    async fn find_material(&self, user_id: &str, material_id: &str) -> AppResult<StudyMaterial> {
        self.materials
            .find_by_id_for_user(material_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Material not found".to_string()))
    }
}

/// Quizzes are counted when taken, not when generated.
fn counter_for(kind: ContentKind) -> Option<ProfileCounter> {
    match kind {
        ContentKind::Summary => Some(ProfileCounter::SummariesGenerated),
        ContentKind::Notes => Some(ProfileCounter::NotesGenerated),
        ContentKind::Flashcards => Some(ProfileCounter::FlashcardsGenerated),
        ContentKind::Quiz => None,
    }
}
