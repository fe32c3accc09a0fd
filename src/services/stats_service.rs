use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::ContentKind,
        dto::response::{Activity, ActivityType, DashboardStats, UserStats},
    },
    repositories::{
        GeneratedContentRepository, MaterialRepository, QuizRepository, UserProfileRepository,
    },
};

const RECENT_PER_SOURCE: i64 = 3;
const RECENT_ACTIVITY_LIMIT: usize = 4;

pub struct StatsService {
    materials: Arc<dyn MaterialRepository>,
    contents: Arc<dyn GeneratedContentRepository>,
    quizzes: Arc<dyn QuizRepository>,
    profiles: Arc<dyn UserProfileRepository>,
}

impl StatsService {
    pub fn new(
        materials: Arc<dyn MaterialRepository>,
        contents: Arc<dyn GeneratedContentRepository>,
        quizzes: Arc<dyn QuizRepository>,
        profiles: Arc<dyn UserProfileRepository>,
    ) -> Self {
        Self {
            materials,
            contents,
            quizzes,
            profiles,
        }
    }

    /// Counter-based stats. A user without a profile gets all zeros.
    pub async fn user_stats(&self, user_id: &str) -> AppResult<UserStats> {
        let Some(profile) = self.profiles.find_by_user(user_id).await? else {
            return Ok(UserStats::default());
        };

        let material_count = self.materials.count_by_user(user_id).await?;
        Ok(UserStats::from_profile(&profile, material_count))
    }

    pub async fn dashboard_stats(&self, user_id: &str) -> AppResult<DashboardStats> {
        let material_count = self.materials.count_by_user(user_id).await?;

        Ok(DashboardStats {
            uploaded_documents: material_count,
            study_materials: material_count,
            generated_summaries: self.contents.count_by_kind(user_id, ContentKind::Summary).await?,
            practice_quizzes: self.quizzes.count_by_user(user_id).await?,
        })
    }

    /// Latest uploads and generations, merged newest first.
    pub async fn recent_activity(&self, user_id: &str) -> AppResult<Vec<Activity>> {
        let materials = self
            .materials
            .list_recent_by_user(user_id, RECENT_PER_SOURCE)
            .await?;
        let contents = self
            .contents
            .list_recent_by_user(user_id, RECENT_PER_SOURCE)
            .await?;

        let mut activities: Vec<Activity> = materials
            .iter()
            .map(|material| Activity {
                id: material.id.clone(),
                action: format!("Uploaded {}", material.title),
                time: material.uploaded_at,
                activity_type: ActivityType::Material,
            })
            .collect();

        for content in contents {
            let material_title = match materials.iter().find(|m| m.id == content.material_id) {
                Some(material) => material.title.clone(),
                None => self
                    .materials
                    .find_by_id_for_user(&content.material_id, user_id)
                    .await?
                    .map(|m| m.title)
                    .unwrap_or_else(|| "deleted material".to_string()),
            };

            activities.push(Activity {
                action: format!(
                    "Generated {} for {}",
                    content.content_kind.display_name(),
                    material_title
                ),
                id: content.id,
                time: content.created_at,
                activity_type: ActivityType::Content,
            });
        }

        activities.sort_by(|a, b| b.time.cmp(&a.time));
        activities.truncate(RECENT_ACTIVITY_LIMIT);
        Ok(activities)
    }
}
