use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// Running per-user totals. Counters only ever go up.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub summaries_generated: i64,
    #[serde(default)]
    pub notes_generated: i64,
    #[serde(default)]
    pub flashcards_generated: i64,
    #[serde(default)]
    pub quizzes_taken: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileCounter {
    SummariesGenerated,
    NotesGenerated,
    FlashcardsGenerated,
    QuizzesTaken,
}

impl ProfileCounter {
    pub fn field_name(&self) -> &'static str {
        match self {
            ProfileCounter::SummariesGenerated => "summaries_generated",
            ProfileCounter::NotesGenerated => "notes_generated",
            ProfileCounter::FlashcardsGenerated => "flashcards_generated",
            ProfileCounter::QuizzesTaken => "quizzes_taken",
        }
    }
}

impl UserProfile {
    pub fn new(user_id: &str) -> Self {
        UserProfile {
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    pub fn increment(&mut self, counter: ProfileCounter) {
        match counter {
            ProfileCounter::SummariesGenerated => self.summaries_generated += 1,
            ProfileCounter::NotesGenerated => self.notes_generated += 1,
            ProfileCounter::FlashcardsGenerated => self.flashcards_generated += 1,
            ProfileCounter::QuizzesTaken => self.quizzes_taken += 1,
        }
    }
}
