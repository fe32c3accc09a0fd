pub mod content_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod material_handler;
pub mod quiz_handler;
pub mod stats_handler;

use actix_web::web;

pub use content_handler::{existing_content, generate_content, get_content, list_contents};
pub use graphql_handler::graphql_handler;
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use material_handler::{create_material, delete_material, get_material, list_materials};
pub use quiz_handler::{get_quiz, list_quizzes, quiz_history, retake_quiz, submit_quiz_result};
pub use stats_handler::{dashboard_stats, recent_activity, user_stats};

/// Routes mounted under the authenticated `/api` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(create_material)
        .service(list_materials)
        .service(get_material)
        .service(delete_material)
        .service(generate_content)
        .service(list_contents)
        // before `/content/{id}` so "existing" is not taken as an id
        .service(existing_content)
        .service(get_content)
        .service(list_quizzes)
        .service(get_quiz)
        .service(quiz_history)
        .service(retake_quiz)
        .service(submit_quiz_result)
        .service(user_stats)
        .service(dashboard_stats)
        .service(recent_activity);
}

pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(health_check_ready);
}
