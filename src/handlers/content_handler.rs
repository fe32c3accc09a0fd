use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{ExistingContentQuery, GenerateContentRequest},
};

#[post("/generate-content")]
pub async fn generate_content(
    state: web::Data<AppState>,
    request: web::Json<GenerateContentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .study_content_service
        .generate_for_material(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/content")]
pub async fn list_contents(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let contents = state.study_content_service.list_contents(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(contents))
}

#[get("/content/existing")]
pub async fn existing_content(
    state: web::Data<AppState>,
    query: web::Query<ExistingContentQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let existing = state
        .study_content_service
        .existing_content(auth.user_id(), &query.material_id)
        .await?;
    Ok(HttpResponse::Ok().json(existing))
}

#[get("/content/{id}")]
pub async fn get_content(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let content = state.study_content_service.get_content(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(content))
}
