use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::CreateMaterialRequest,
};

#[post("/materials")]
pub async fn create_material(
    state: web::Data<AppState>,
    request: web::Json<CreateMaterialRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let material = state
        .material_service
        .create_material(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(material))
}

#[get("/materials")]
pub async fn list_materials(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let materials = state.material_service.list_materials(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(materials))
}

#[get("/materials/{id}")]
pub async fn get_material(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let material = state.material_service.get_material(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(material))
}

#[delete("/materials/{id}")]
pub async fn delete_material(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state.material_service.delete_material(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(response))
}
