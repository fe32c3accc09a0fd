mod common;

use std::time::Duration;

use common::{StubModelClient, TestContext, MATERIAL_TEXT, OTHER_USER_ID, USER_ID};
use learnai_server::{
    errors::AppError,
    models::dto::request::{SubmitQuizResultRequest, SubmittedAnswer},
    repositories::{QuizAttemptRepository, UserProfileRepository},
};

fn submission(quiz_id: &str, score: u32, total: u32, is_retake: bool) -> SubmitQuizResultRequest {
    SubmitQuizResultRequest {
        quiz_id: quiz_id.to_string(),
        score,
        total_questions: total,
        answers: Vec::new(),
        is_retake,
    }
}

async fn quiz_context(questions: usize) -> (TestContext, String) {
    let ctx = TestContext::new(StubModelClient::replying("unused"));
    let material = ctx.seed_material(USER_ID, "Biology", Some(MATERIAL_TEXT)).await;
    let quiz = ctx.seed_quiz(USER_ID, &material.id, questions).await;
    (ctx, quiz.id)
}

#[tokio::test]
async fn first_submission_is_recorded_and_counted() {
    let (ctx, quiz_id) = quiz_context(10).await;

    let response = ctx
        .state
        .quiz_lifecycle_service
        .submit_result(USER_ID, submission(&quiz_id, 7, 10, false))
        .await
        .unwrap();

    assert_eq!(response.percentage, 70);
    assert_eq!(response.message, "Quiz results saved successfully");
    assert_eq!(ctx.attempts.completed_count(USER_ID, &quiz_id).await, 1);

    let profile = ctx.profiles.find_by_user(USER_ID).await.unwrap().unwrap();
    assert_eq!(profile.quizzes_taken, 1);
}

#[tokio::test]
async fn second_submission_without_retake_is_rejected() {
    let (ctx, quiz_id) = quiz_context(10).await;
    let service = &ctx.state.quiz_lifecycle_service;

    let first = service
        .submit_result(USER_ID, submission(&quiz_id, 7, 10, false))
        .await
        .unwrap();
    let second = service
        .submit_result(USER_ID, submission(&quiz_id, 9, 10, false))
        .await;

    match second {
        Err(AppError::AlreadyCompleted { result_id }) => assert_eq!(result_id, first.result_id),
        other => panic!("expected AlreadyCompleted, got {:?}", other),
    }
    assert_eq!(ctx.attempts.all().await.len(), 1);

    let profile = ctx.profiles.find_by_user(USER_ID).await.unwrap().unwrap();
    assert_eq!(profile.quizzes_taken, 1);
}

#[tokio::test]
async fn retake_submission_replaces_completed_attempt() {
    let (ctx, quiz_id) = quiz_context(10).await;
    let service = &ctx.state.quiz_lifecycle_service;

    let first = service
        .submit_result(USER_ID, submission(&quiz_id, 7, 10, false))
        .await
        .unwrap();
    let retake = service
        .submit_result(USER_ID, submission(&quiz_id, 9, 10, true))
        .await
        .unwrap();

    assert_ne!(retake.result_id, first.result_id);
    assert_eq!(retake.percentage, 90);
    assert_eq!(ctx.attempts.completed_count(USER_ID, &quiz_id).await, 1);

    let attempts = ctx.attempts.all().await;
    let old = attempts.iter().find(|a| a.id == first.result_id).unwrap();
    assert!(!old.completed);
    assert_eq!(old.score, 7);

    let profile = ctx.profiles.find_by_user(USER_ID).await.unwrap().unwrap();
    assert_eq!(profile.quizzes_taken, 2);
}

#[tokio::test]
async fn retake_then_plain_submit_succeeds() {
    let (ctx, quiz_id) = quiz_context(4).await;
    let service = &ctx.state.quiz_lifecycle_service;

    service
        .submit_result(USER_ID, submission(&quiz_id, 1, 4, false))
        .await
        .unwrap();
    let reset = service.retake(USER_ID, &quiz_id).await.unwrap();
    assert_eq!(reset.message, "Quiz reset for retaking");
    assert_eq!(reset.quiz_id, quiz_id);
    assert_eq!(ctx.attempts.completed_count(USER_ID, &quiz_id).await, 0);

    service
        .submit_result(USER_ID, submission(&quiz_id, 4, 4, false))
        .await
        .unwrap();
    assert_eq!(ctx.attempts.completed_count(USER_ID, &quiz_id).await, 1);
}

#[tokio::test]
async fn retake_without_completed_attempt_is_a_no_op() {
    let (ctx, quiz_id) = quiz_context(4).await;
    let service = &ctx.state.quiz_lifecycle_service;

    service.retake(USER_ID, &quiz_id).await.unwrap();
    service.retake(USER_ID, &quiz_id).await.unwrap();

    assert!(ctx.attempts.all().await.is_empty());
}

#[tokio::test]
async fn zero_question_total_reports_zero_percent() {
    let (ctx, quiz_id) = quiz_context(1).await;

    let response = ctx
        .state
        .quiz_lifecycle_service
        .submit_result(USER_ID, submission(&quiz_id, 0, 0, false))
        .await
        .unwrap();

    assert_eq!(response.percentage, 0);
}

#[tokio::test]
async fn answers_for_unknown_questions_are_dropped() {
    let (ctx, quiz_id) = quiz_context(2).await;
    let quiz = ctx.quizzes.all().await.remove(0);
    let known = quiz.questions[0].id.clone();

    let mut request = submission(&quiz_id, 1, 2, false);
    request.answers = vec![
        SubmittedAnswer {
            question_id: known.clone(),
            selected_option: "A".to_string(),
            is_correct: true,
        },
        SubmittedAnswer {
            question_id: "not-in-this-quiz".to_string(),
            selected_option: "B".to_string(),
            is_correct: false,
        },
    ];

    ctx.state
        .quiz_lifecycle_service
        .submit_result(USER_ID, request)
        .await
        .unwrap();

    let attempt = ctx.attempts.all().await.remove(0);
    assert_eq!(attempt.answers.len(), 1);
    assert_eq!(attempt.answers[0].question_id, known);
    assert!(attempt.answers[0].is_correct);
}

#[tokio::test]
async fn history_lists_attempts_newest_first() {
    let (ctx, quiz_id) = quiz_context(10).await;
    let service = &ctx.state.quiz_lifecycle_service;

    for (score, is_retake) in [(3, false), (6, true), (9, true)] {
        service
            .submit_result(USER_ID, submission(&quiz_id, score, 10, is_retake))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let history = service.history(USER_ID, &quiz_id).await.unwrap();
    let scores: Vec<u32> = history.iter().map(|a| a.score).collect();
    assert_eq!(scores, vec![9, 6, 3]);
    assert!(history[0].completed);
    assert!(history[1..].iter().all(|a| !a.completed));
}

#[tokio::test]
async fn other_users_quiz_is_not_found() {
    let (ctx, quiz_id) = quiz_context(3).await;
    let service = &ctx.state.quiz_lifecycle_service;

    let submit = service
        .submit_result(OTHER_USER_ID, submission(&quiz_id, 3, 3, false))
        .await;
    let retake = service.retake(OTHER_USER_ID, &quiz_id).await;
    let history = service.history(OTHER_USER_ID, &quiz_id).await;
    let details = service.quiz_details(OTHER_USER_ID, &quiz_id).await;

    assert!(matches!(submit, Err(AppError::NotFound(_))));
    assert!(matches!(retake, Err(AppError::NotFound(_))));
    assert!(matches!(history, Err(AppError::NotFound(_))));
    assert!(matches!(details, Err(AppError::NotFound(_))));
    assert!(ctx.attempts.all().await.is_empty());
}

#[tokio::test]
async fn quiz_listing_reflects_completion() {
    let ctx = TestContext::new(StubModelClient::replying("unused"));
    let material = ctx.seed_material(USER_ID, "Biology", Some(MATERIAL_TEXT)).await;
    let done = ctx.seed_quiz(USER_ID, &material.id, 5).await;
    let open = ctx.seed_quiz(USER_ID, &material.id, 3).await;
    let service = &ctx.state.quiz_lifecycle_service;

    service
        .submit_result(USER_ID, submission(&done.id, 4, 5, false))
        .await
        .unwrap();

    let summaries = service.list_quizzes(USER_ID).await.unwrap();
    assert_eq!(summaries.len(), 2);

    let done_summary = summaries.iter().find(|s| s.id == done.id).unwrap();
    assert!(done_summary.is_completed);
    assert_eq!(done_summary.latest_score, 4);
    assert_eq!(done_summary.question_count, 5);

    let open_summary = summaries.iter().find(|s| s.id == open.id).unwrap();
    assert!(!open_summary.is_completed);

    let details = service.quiz_details(USER_ID, &open.id).await.unwrap();
    assert_eq!(details.questions.len(), 3);
    assert!(service.list_quizzes(OTHER_USER_ID).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_submissions_keep_one_completed_attempt() {
    let (ctx, quiz_id) = quiz_context(10).await;
    let service = &ctx.state.quiz_lifecycle_service;

    let (a, b) = tokio::join!(
        service.submit_result(USER_ID, submission(&quiz_id, 5, 10, false)),
        service.submit_result(USER_ID, submission(&quiz_id, 8, 10, false)),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!([&a, &b]
        .iter()
        .any(|r| matches!(r, Err(AppError::AlreadyCompleted { .. }))));
    assert_eq!(ctx.attempts.completed_count(USER_ID, &quiz_id).await, 1);
}

#[tokio::test]
async fn concurrent_retakes_keep_one_completed_attempt() {
    let (ctx, quiz_id) = quiz_context(10).await;
    let service = &ctx.state.quiz_lifecycle_service;

    service
        .submit_result(USER_ID, submission(&quiz_id, 2, 10, false))
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        service.submit_result(USER_ID, submission(&quiz_id, 6, 10, true)),
        service.submit_result(USER_ID, submission(&quiz_id, 7, 10, true)),
    );

    assert!(first.is_ok() || second.is_ok());
    assert_eq!(ctx.attempts.completed_count(USER_ID, &quiz_id).await, 1);
}

#[tokio::test]
async fn failed_retake_insert_restores_previous_result() {
    let (ctx, quiz_id) = quiz_context(10).await;
    let service = &ctx.state.quiz_lifecycle_service;

    let first = service
        .submit_result(USER_ID, submission(&quiz_id, 4, 10, false))
        .await
        .unwrap();
    ctx.attempts
        .fail_creates_with(AppError::DatabaseError("write rejected".to_string()));

    let retake = service
        .submit_result(USER_ID, submission(&quiz_id, 9, 10, true))
        .await;

    assert!(matches!(retake, Err(AppError::DatabaseError(_))));
    assert_eq!(ctx.attempts.completed_count(USER_ID, &quiz_id).await, 1);
    let current = ctx.attempts.find_completed(USER_ID, &quiz_id).await.unwrap().unwrap();
    assert_eq!(current.id, first.result_id);
    assert_eq!(current.score, 4);

    let profile = ctx.profiles.find_by_user(USER_ID).await.unwrap().unwrap();
    assert_eq!(profile.quizzes_taken, 1);
}

#[tokio::test]
async fn duplicate_without_visible_winner_is_not_reported_as_completed() {
    let (ctx, quiz_id) = quiz_context(3).await;
    ctx.attempts
        .fail_creates_with(AppError::AlreadyExists("Duplicate key".to_string()));

    let result = ctx
        .state
        .quiz_lifecycle_service
        .submit_result(USER_ID, submission(&quiz_id, 3, 3, false))
        .await;

    assert!(matches!(result, Err(AppError::AlreadyExists(_))));
}
