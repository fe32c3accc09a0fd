use std::{fmt, str::FromStr};

use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// What a generation request asks the model for. Selects both the prompt
/// template and the expected response shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Summary,
    Notes,
    Flashcards,
    Quiz,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Summary,
        ContentKind::Notes,
        ContentKind::Flashcards,
        ContentKind::Quiz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Summary => "summary",
            ContentKind::Notes => "notes",
            ContentKind::Flashcards => "flashcards",
            ContentKind::Quiz => "quiz",
        }
    }

    /// Human readable label used in activity feeds.
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentKind::Summary => "Summary",
            ContentKind::Notes => "Study Notes",
            ContentKind::Flashcards => "Flashcards",
            ContentKind::Quiz => "Quiz",
        }
    }

    /// Free-text kinds are returned verbatim; the others carry a JSON list.
    pub fn is_structured(&self) -> bool {
        matches!(self, ContentKind::Flashcards | ContentKind::Quiz)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "summary" => Ok(ContentKind::Summary),
            "notes" => Ok(ContentKind::Notes),
            "flashcards" => Ok(ContentKind::Flashcards),
            "quiz" => Ok(ContentKind::Quiz),
            other => Err(AppError::InvalidContentKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Flashcard {
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
}

/// A multiple choice question as produced by the model. `answer` is expected
/// to equal one of `options` but nothing checks it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizQuestion {
    #[serde(default)]
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneratedPayload {
    Text(String),
    Flashcards(Vec<Flashcard>),
    Quiz(Vec<QuizQuestion>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationResult {
    pub kind: ContentKind,
    pub payload: GeneratedPayload,
}

impl GenerationResult {
    /// JSON view of the payload: a string for free text, an array otherwise.
    pub fn content_json(&self) -> serde_json::Value {
        match &self.payload {
            GeneratedPayload::Text(text) => serde_json::Value::String(text.clone()),
            GeneratedPayload::Flashcards(cards) => {
                serde_json::to_value(cards).unwrap_or(serde_json::Value::Null)
            }
            GeneratedPayload::Quiz(questions) => {
                serde_json::to_value(questions).unwrap_or(serde_json::Value::Null)
            }
        }
    }

    /// Text form written to storage. Lists are stored as JSON text.
    pub fn stored_content(&self) -> String {
        match &self.payload {
            GeneratedPayload::Text(text) => text.clone(),
            _ => self.content_json().to_string(),
        }
    }
}

/// Inverse of [`GenerationResult::stored_content`]: JSON-looking records are
/// decoded, anything else is handed back as a plain string.
pub fn stored_content_to_json(content: &str) -> serde_json::Value {
    if content.starts_with('[') || content.starts_with('{') {
        if let Ok(value) = serde_json::from_str(content) {
            return value;
        }
    }
    serde_json::Value::String(content.to_string())
}
