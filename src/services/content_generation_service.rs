use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{ContentKind, GeneratedPayload, GenerationResult},
    services::{model_service::ModelClient, prompt_builder::build_prompt, response_extractor},
};

/// Prompt, model call, extraction. Nothing is persisted here; the caller
/// stores the returned result.
pub struct ContentGenerationService {
    model: Arc<dyn ModelClient>,
}

impl ContentGenerationService {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    /// Generates content for a raw kind tag. Unknown tags fail before the
    /// model is contacted.
    pub async fn generate(&self, material_text: &str, content_type: &str) -> AppResult<GenerationResult> {
        let kind: ContentKind = content_type.parse()?;
        self.generate_kind(material_text, kind).await
    }

    pub async fn generate_kind(
        &self,
        material_text: &str,
        kind: ContentKind,
    ) -> AppResult<GenerationResult> {
        let prompt = build_prompt(material_text, kind);

        log::info!("Requesting {} from model ({} chars of material)", kind, material_text.len());
        let raw_text = self.model.generate_content(&prompt).await?;

        let payload = match kind {
            ContentKind::Summary | ContentKind::Notes => GeneratedPayload::Text(raw_text),
            ContentKind::Flashcards => {
                GeneratedPayload::Flashcards(response_extractor::parse_flashcards(&raw_text))
            }
            ContentKind::Quiz => GeneratedPayload::Quiz(response_extractor::parse_quiz(&raw_text)),
        };

        Ok(GenerationResult { kind, payload })
    }
}
