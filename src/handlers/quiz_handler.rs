use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::SubmitQuizResultRequest,
};

#[get("/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_lifecycle_service.list_quizzes(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let details = state.quiz_lifecycle_service.quiz_details(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(details))
}

#[get("/quizzes/{id}/history")]
pub async fn quiz_history(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let attempts = state.quiz_lifecycle_service.history(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(attempts))
}

#[post("/quizzes/{id}/retake")]
pub async fn retake_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.quiz_lifecycle_service.retake(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/quiz-results")]
pub async fn submit_quiz_result(
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizResultRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .quiz_lifecycle_service
        .submit_result(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
