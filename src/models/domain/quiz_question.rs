use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::generation::QuizQuestion;

/// A persisted quiz question. Created from a generated [`QuizQuestion`] with a
/// fresh id so submitted answers can reference it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Question {
    pub id: String,
    pub question_text: String,
    pub answer: String,
    pub options: Vec<String>,
}

impl From<QuizQuestion> for Question {
    fn from(generated: QuizQuestion) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            question_text: generated.question_text,
            answer: generated.answer,
            options: generated.options,
        }
    }
}
