use async_graphql::{ComplexObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::models::domain::{
    ContentKind, GeneratedContent, Question, Quiz, QuizAttempt, UserProfile,
};

/// Result of a generation request. `content` is a string for summaries and
/// notes and a JSON array for flashcards and quizzes.
#[derive(Debug, Clone, Serialize, SimpleObject)]
#[graphql(complex)]
pub struct GenerateContentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<String>,
    #[serde(rename = "type")]
    pub content_type: ContentKind,
    #[graphql(skip)]
    pub content: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[ComplexObject]
impl GenerateContentResponse {
    /// Text content verbatim, structured content as JSON text.
    #[graphql(name = "content")]
    async fn graphql_content(&self) -> String {
        match &self.content {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SubmitQuizResultResponse {
    pub result_id: String,
    pub percentage: u32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct RetakeQuizResponse {
    pub message: String,
    pub quiz_id: String,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct DeleteMaterialResponse {
    pub message: String,
}

/// A quiz in the listing, annotated with the user's current completed
/// attempt.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub material_id: Option<String>,
    pub question_count: u32,
    pub created_at: DateTime<Utc>,
    pub is_completed: bool,
    pub latest_score: u32,
    pub latest_total: u32,
}

impl QuizSummary {
    pub fn new(quiz: &Quiz, completed: Option<&QuizAttempt>) -> Self {
        QuizSummary {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            material_id: quiz.material_id.clone(),
            question_count: quiz.questions.len() as u32,
            created_at: quiz.created_at,
            is_completed: completed.is_some(),
            latest_score: completed.map(|a| a.score).unwrap_or(0),
            latest_total: completed.map(|a| a.total_questions).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizDetails {
    pub quiz: QuizSummary,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[graphql(complex)]
pub struct GeneratedContentDto {
    pub id: String,
    pub material_id: String,
    pub content_type: ContentKind,
    #[graphql(skip)]
    pub content: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[ComplexObject]
impl GeneratedContentDto {
    #[graphql(name = "content")]
    async fn graphql_content(&self) -> String {
        match &self.content {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl From<GeneratedContent> for GeneratedContentDto {
    fn from(record: GeneratedContent) -> Self {
        GeneratedContentDto {
            content: crate::models::domain::generation::stored_content_to_json(&record.content),
            id: record.id,
            material_id: record.material_id,
            content_type: record.content_kind,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct ExistingContentEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which kinds already have stored content for a material. Only summaries
/// and notes are reported; flashcards and quizzes are regenerated every time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, SimpleObject)]
pub struct ExistingContent {
    pub summary: Option<ExistingContentEntry>,
    pub notes: Option<ExistingContentEntry>,
    pub flashcards: Option<ExistingContentEntry>,
    pub quiz: Option<ExistingContentEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, SimpleObject)]
pub struct UserStats {
    pub uploaded_documents: i64,
    pub study_materials: i64,
    pub generated_summaries: i64,
    pub practice_quizzes: i64,
    pub flashcards_created: i64,
    pub notes_created: i64,
}

impl UserStats {
    pub fn from_profile(profile: &UserProfile, material_count: i64) -> Self {
        UserStats {
            uploaded_documents: material_count,
            study_materials: material_count,
            generated_summaries: profile.summaries_generated,
            practice_quizzes: profile.quizzes_taken,
            flashcards_created: profile.flashcards_generated,
            notes_created: profile.notes_generated,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, SimpleObject)]
pub struct DashboardStats {
    pub uploaded_documents: i64,
    pub study_materials: i64,
    pub generated_summaries: i64,
    pub practice_quizzes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, async_graphql::Enum)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Material,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct Activity {
    pub id: String,
    pub action: String,
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
}
