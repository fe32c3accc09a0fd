use async_graphql::Context;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Owner id of the GraphQL caller. Every resolver scopes its data by it.
pub fn require_user_id(ctx: &Context<'_>) -> AppResult<String> {
    ctx.data_opt::<Claims>()
        .map(|claims| claims.sub.clone())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
}
