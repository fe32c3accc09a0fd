use async_graphql::{Context, Object, Result, ResultExt, ID};

use crate::{
    app_state::AppState,
    auth::require_user_id,
    models::{
        domain::{QuizAttempt, StudyMaterial},
        dto::response::{GeneratedContentDto, QuizDetails, QuizSummary, UserStats},
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn materials(&self, ctx: &Context<'_>) -> Result<Vec<StudyMaterial>> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state.material_service.list_materials(&user_id).await.extend()
    }

    async fn material(&self, ctx: &Context<'_>, id: ID) -> Result<StudyMaterial> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state.material_service.get_material(&user_id, &id).await.extend()
    }

    async fn generated_contents(&self, ctx: &Context<'_>) -> Result<Vec<GeneratedContentDto>> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state.study_content_service.list_contents(&user_id).await.extend()
    }

    async fn quizzes(&self, ctx: &Context<'_>) -> Result<Vec<QuizSummary>> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state.quiz_lifecycle_service.list_quizzes(&user_id).await.extend()
    }

    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> Result<QuizDetails> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state
            .quiz_lifecycle_service
            .quiz_details(&user_id, &id)
            .await
            .extend()
    }

    /// Attempts for a quiz, newest first.
    async fn quiz_history(&self, ctx: &Context<'_>, quiz_id: ID) -> Result<Vec<QuizAttempt>> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state
            .quiz_lifecycle_service
            .history(&user_id, &quiz_id)
            .await
            .extend()
    }

    async fn user_stats(&self, ctx: &Context<'_>) -> Result<UserStats> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state.stats_service.user_stats(&user_id).await.extend()
    }
}
