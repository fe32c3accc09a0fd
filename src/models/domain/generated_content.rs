use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::generation::ContentKind;

/// Stored output of one generation, unique per (user, material, kind).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct GeneratedContent {
    pub id: String,
    pub user_id: String,
    pub material_id: String,
    pub content_kind: ContentKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GeneratedContent {
    pub fn new(user_id: &str, material_id: &str, content_kind: ContentKind, content: String) -> Self {
        let now = Utc::now();
        GeneratedContent {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            material_id: material_id.to_string(),
            content_kind,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}
