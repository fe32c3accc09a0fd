use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::StudyMaterial,
        dto::{request::CreateMaterialRequest, response::DeleteMaterialResponse},
    },
    repositories::{
        GeneratedContentRepository, MaterialRepository, QuizAttemptRepository, QuizRepository,
    },
};

pub struct MaterialService {
    materials: Arc<dyn MaterialRepository>,
    contents: Arc<dyn GeneratedContentRepository>,
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
}

impl MaterialService {
    pub fn new(
        materials: Arc<dyn MaterialRepository>,
        contents: Arc<dyn GeneratedContentRepository>,
        quizzes: Arc<dyn QuizRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
    ) -> Self {
        Self {
            materials,
            contents,
            quizzes,
            attempts,
        }
    }

    pub async fn create_material(
        &self,
        user_id: &str,
        request: CreateMaterialRequest,
    ) -> AppResult<StudyMaterial> {
        request.validate()?;

        let material = StudyMaterial::new(
            user_id,
            &request.title,
            &request.file_name,
            request.extracted_text,
        )?;

        log::info!(
            "Storing material '{}' ({:?}) for user {}",
            material.title,
            material.file_type,
            user_id
        );
        self.materials.create(material).await
    }

    pub async fn list_materials(&self, user_id: &str) -> AppResult<Vec<StudyMaterial>> {
        self.materials.list_by_user(user_id).await
    }

    pub async fn get_material(&self, user_id: &str, id: &str) -> AppResult<StudyMaterial> {
        self.materials
            .find_by_id_for_user(id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Material not found".to_string()))
    }

    /// Removes the material together with its generated content, quizzes and
    /// the attempts on those quizzes.
    pub async fn delete_material(&self, user_id: &str, id: &str) -> AppResult<DeleteMaterialResponse> {
        let material = self.get_material(user_id, id).await?;

        let removed_contents = self.contents.delete_by_material(user_id, &material.id).await?;
        let quiz_ids = self.quizzes.delete_by_material(user_id, &material.id).await?;
        let removed_attempts = self.attempts.delete_by_quiz_ids(user_id, &quiz_ids).await?;
        self.materials.delete_for_user(&material.id, user_id).await?;

        log::info!(
            "Deleted material {} with {} content records, {} quizzes, {} attempts",
            material.id,
            removed_contents,
            quiz_ids.len(),
            removed_attempts
        );

        Ok(DeleteMaterialResponse {
            message: "Material deleted successfully".to_string(),
        })
    }
}
