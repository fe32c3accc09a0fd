use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{quiz_attempt::percentage, ProfileCounter, Quiz, QuizAnswer, QuizAttempt},
        dto::{
            request::SubmitQuizResultRequest,
            response::{QuizDetails, QuizSummary, RetakeQuizResponse, SubmitQuizResultResponse},
        },
    },
    repositories::{QuizAttemptRepository, QuizRepository, UserProfileRepository},
};

/// Owns quiz attempts: one completed attempt per (user, quiz), retakes,
/// history and the `quizzes_taken` counter.
pub struct QuizLifecycleService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    profiles: Arc<dyn UserProfileRepository>,
}

impl QuizLifecycleService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        profiles: Arc<dyn UserProfileRepository>,
    ) -> Self {
        Self {
            quizzes,
            attempts,
            profiles,
        }
    }

    pub async fn submit_result(
        &self,
        user_id: &str,
        request: SubmitQuizResultRequest,
    ) -> AppResult<SubmitQuizResultResponse> {
        request.validate()?;
        let quiz = self.find_quiz(user_id, &request.quiz_id).await?;

        let existing = self.attempts.find_completed(user_id, &quiz.id).await?;
        if let (Some(existing), false) = (&existing, request.is_retake) {
            return Err(AppError::AlreadyCompleted {
                result_id: existing.id.clone(),
            });
        }

        // Kept so the official result can be put back if the insert fails.
        let demoted = if request.is_retake {
            self.attempts.demote_completed(user_id, &quiz.id).await?;
            existing.map(|attempt| attempt.id)
        } else {
            None
        };

        // Answers for questions outside this quiz are dropped.
        let answers: Vec<QuizAnswer> = request
            .answers
            .into_iter()
            .filter(|answer| quiz.question(&answer.question_id).is_some())
            .map(|answer| QuizAnswer {
                question_id: answer.question_id,
                selected_option: answer.selected_option,
                is_correct: answer.is_correct,
            })
            .collect();

        let attempt = QuizAttempt::new_completed(
            user_id,
            &quiz.id,
            request.score,
            request.total_questions,
            answers,
        );

        let attempt = match self.attempts.create(attempt).await {
            Ok(attempt) => attempt,
            Err(AppError::AlreadyExists(detail)) => {
                // A concurrent submission stored its completed attempt first.
                log::warn!("Concurrent submission for quiz {} by user {}", quiz.id, user_id);
                return match self.attempts.find_completed(user_id, &quiz.id).await? {
                    Some(winner) => Err(AppError::AlreadyCompleted {
                        result_id: winner.id,
                    }),
                    None => Err(AppError::AlreadyExists(detail)),
                };
            }
            Err(e) => {
                if let Some(previous) = demoted {
                    self.restore_completed(user_id, &previous).await;
                }
                return Err(e);
            }
        };

        self.profiles
            .increment(user_id, ProfileCounter::QuizzesTaken)
            .await?;

        log::info!(
            "Recorded attempt {} for quiz {}: {}/{}",
            attempt.id,
            quiz.id,
            attempt.score,
            attempt.total_questions
        );

        Ok(SubmitQuizResultResponse {
            percentage: percentage(attempt.score, attempt.total_questions),
            result_id: attempt.id,
            message: "Quiz results saved successfully".to_string(),
        })
    }

    /// Moves the current completed attempt to history so the quiz can be
    /// submitted again. A no-op when nothing is completed.
    pub async fn retake(&self, user_id: &str, quiz_id: &str) -> AppResult<RetakeQuizResponse> {
        let quiz = self.find_quiz(user_id, quiz_id).await?;
        let demoted = self.attempts.demote_completed(user_id, &quiz.id).await?;

        log::info!("Quiz {} reset for retaking ({} attempts demoted)", quiz.id, demoted);
        Ok(RetakeQuizResponse {
            message: "Quiz reset for retaking".to_string(),
            quiz_id: quiz.id,
        })
    }

    pub async fn history(&self, user_id: &str, quiz_id: &str) -> AppResult<Vec<QuizAttempt>> {
        let quiz = self.find_quiz(user_id, quiz_id).await?;
        self.attempts.find_by_user_and_quiz(user_id, &quiz.id).await
    }

    pub async fn list_quizzes(&self, user_id: &str) -> AppResult<Vec<QuizSummary>> {
        let quizzes = self.quizzes.list_by_user(user_id).await?;

        let mut summaries = Vec::with_capacity(quizzes.len());
        for quiz in &quizzes {
            let completed = self.attempts.find_completed(user_id, &quiz.id).await?;
            summaries.push(QuizSummary::new(quiz, completed.as_ref()));
        }
        Ok(summaries)
    }

    pub async fn quiz_details(&self, user_id: &str, quiz_id: &str) -> AppResult<QuizDetails> {
        let quiz = self.find_quiz(user_id, quiz_id).await?;
        let completed = self.attempts.find_completed(user_id, &quiz.id).await?;

        Ok(QuizDetails {
            quiz: QuizSummary::new(&quiz, completed.as_ref()),
            questions: quiz.questions,
        })
    }

    /// Puts a demoted attempt back after the replacing insert failed, so the
    /// user keeps an official result.
    async fn restore_completed(&self, user_id: &str, attempt_id: &str) {
        match self.attempts.promote(user_id, attempt_id).await {
            Ok(_) => log::info!("Restored completed attempt {}", attempt_id),
            Err(e) => log::error!("Failed to restore completed attempt {}: {}", attempt_id, e),
        }
    }

    async fn find_quiz(&self, user_id: &str, quiz_id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id_for_user(quiz_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
    }
}
