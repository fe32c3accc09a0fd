use async_graphql::{Context, Object, Result, ResultExt, ID};

use crate::{
    app_state::AppState,
    auth::require_user_id,
    models::dto::{
        request::{GenerateContentRequest, SubmitQuizResultRequest},
        response::{
            DeleteMaterialResponse, GenerateContentResponse, RetakeQuizResponse,
            SubmitQuizResultResponse,
        },
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn generate_content(
        &self,
        ctx: &Context<'_>,
        input: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state
            .study_content_service
            .generate_for_material(&user_id, input)
            .await
            .extend()
    }

    async fn submit_quiz_result(
        &self,
        ctx: &Context<'_>,
        input: SubmitQuizResultRequest,
    ) -> Result<SubmitQuizResultResponse> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state
            .quiz_lifecycle_service
            .submit_result(&user_id, input)
            .await
            .extend()
    }

    async fn retake_quiz(&self, ctx: &Context<'_>, quiz_id: ID) -> Result<RetakeQuizResponse> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state
            .quiz_lifecycle_service
            .retake(&user_id, &quiz_id)
            .await
            .extend()
    }

    async fn delete_material(&self, ctx: &Context<'_>, id: ID) -> Result<DeleteMaterialResponse> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_id(ctx).extend()?;

        state
            .material_service
            .delete_material(&user_id, &id)
            .await
            .extend()
    }
}
