pub mod generated_content;
pub mod generation;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod study_material;
pub mod user_profile;
pub use generated_content::GeneratedContent;
pub use generation::{ContentKind, Flashcard, GeneratedPayload, GenerationResult, QuizQuestion};
pub use quiz::Quiz;
pub use quiz_attempt::{QuizAnswer, QuizAttempt};
pub use quiz_question::Question;
pub use study_material::{MaterialType, StudyMaterial};
pub use user_profile::{ProfileCounter, UserProfile};
