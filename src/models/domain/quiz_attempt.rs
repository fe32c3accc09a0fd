use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One submission of a quiz. At most one attempt per (user, quiz) has
/// `completed = true`; retakes demote the previous one to history.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[graphql(complex)]
pub struct QuizAttempt {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub completed: bool,
    pub answers: Vec<QuizAnswer>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizAnswer {
    pub question_id: String,
    pub selected_option: String,
    pub is_correct: bool,
}

#[async_graphql::ComplexObject]
impl QuizAttempt {
    #[graphql(name = "percentage")]
    async fn graphql_percentage(&self) -> u32 {
        self.percentage()
    }
}

impl QuizAttempt {
    pub fn new_completed(
        user_id: &str,
        quiz_id: &str,
        score: u32,
        total_questions: u32,
        answers: Vec<QuizAnswer>,
    ) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            score,
            total_questions,
            completed: true,
            answers,
            completed_at: Utc::now(),
        }
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.score, self.total_questions)
    }
}

/// `round(score / total * 100)` with halves going to the even neighbour,
/// 0 when there are no questions.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(score) / f64::from(total) * 100.0).round_ties_even() as u32
}
