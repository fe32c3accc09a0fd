use crate::{
    constants::prompts::{
        FLASHCARDS_PROMPT, NOTES_PROMPT, QUIZ_PROMPT, STUDY_MATERIAL_HEADER, SUMMARY_PROMPT,
    },
    models::domain::ContentKind,
};

/// Builds the instruction text sent to the model for `kind`, with the
/// material appended verbatim. Empty material is passed through as is.
pub fn build_prompt(material_text: &str, kind: ContentKind) -> String {
    let instructions = match kind {
        ContentKind::Summary => SUMMARY_PROMPT,
        ContentKind::Notes => NOTES_PROMPT,
        ContentKind::Flashcards => FLASHCARDS_PROMPT,
        ContentKind::Quiz => QUIZ_PROMPT,
    };

    format!("{instructions}\n\n{STUDY_MATERIAL_HEADER}\n{material_text}")
}
