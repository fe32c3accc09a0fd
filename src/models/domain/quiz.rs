use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{generation::QuizQuestion, quiz_question::Question};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Quiz {
    pub id: String,
    pub user_id: String,
    pub material_id: Option<String>,
    pub title: String,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// Builds a quiz for a material from freshly generated questions.
    pub fn from_generated(
        user_id: &str,
        material_id: &str,
        material_title: &str,
        generated: Vec<QuizQuestion>,
    ) -> Self {
        let now = Utc::now();
        Quiz {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            material_id: Some(material_id.to_string()),
            title: format!("Quiz: {} - {}", material_title, now.format("%Y-%m-%d %H:%M")),
            questions: generated.into_iter().map(Question::from).collect(),
            created_at: now,
        }
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}
