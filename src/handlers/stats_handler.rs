use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

#[get("/user-stats")]
pub async fn user_stats(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let stats = state.stats_service.user_stats(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[get("/dashboard/stats")]
pub async fn dashboard_stats(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let stats = state.stats_service.dashboard_stats(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[get("/dashboard/activity")]
pub async fn recent_activity(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let activity = state.stats_service.recent_activity(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(activity))
}
