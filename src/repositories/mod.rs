pub mod generated_content_repository;
pub mod material_repository;
pub mod quiz_attempt_repository;
pub mod quiz_repository;
pub mod user_profile_repository;

pub use generated_content_repository::{GeneratedContentRepository, MongoGeneratedContentRepository};
pub use material_repository::{MaterialRepository, MongoMaterialRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use user_profile_repository::{MongoUserProfileRepository, UserProfileRepository};
