use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CreateMaterialRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, max = 255))]
    pub file_name: String,

    /// Plain text pulled out of the uploaded file by the upload pipeline.
    #[serde(default)]
    pub extracted_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct GenerateContentRequest {
    #[validate(length(min = 1, message = "Material ID is required"))]
    pub material_id: String,

    /// Raw content kind tag; parsed by the service so unknown kinds surface
    /// as `InvalidContentKind` rather than a deserialization error.
    #[validate(length(min = 1, message = "Content type is required"))]
    pub content_type: String,

    #[serde(default)]
    #[graphql(default)]
    pub regenerate: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SubmitQuizResultRequest {
    #[validate(length(min = 1, message = "Quiz ID is required"))]
    pub quiz_id: String,

    pub score: u32,

    pub total_questions: u32,

    #[serde(default)]
    #[graphql(default)]
    pub answers: Vec<SubmittedAnswer>,

    #[serde(default)]
    #[graphql(default)]
    pub is_retake: bool,
}

/// One answer as sent by the quiz player. Both snake_case and the player's
/// camelCase keys are accepted.
#[derive(Debug, Clone, Deserialize, InputObject)]
pub struct SubmittedAnswer {
    #[serde(alias = "questionId")]
    pub question_id: String,

    #[serde(alias = "selected")]
    pub selected_option: String,

    #[serde(alias = "correct", default)]
    #[graphql(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExistingContentQuery {
    pub material_id: String,
}
