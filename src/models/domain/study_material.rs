use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct StudyMaterial {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub file_name: String,
    pub file_type: MaterialType,
    pub extracted_text: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub processed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Pdf,
    Docx,
    Ppt,
    Txt,
    Img,
}

impl MaterialType {
    /// Maps a file name to its material type by extension.
    pub fn from_file_name(file_name: &str) -> AppResult<Self> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(MaterialType::Pdf),
            "docx" => Ok(MaterialType::Docx),
            "ppt" | "pptx" => Ok(MaterialType::Ppt),
            "txt" => Ok(MaterialType::Txt),
            "jpg" | "jpeg" | "png" => Ok(MaterialType::Img),
            _ => Err(AppError::ValidationError(format!(
                "Unsupported file type for '{}'",
                file_name
            ))),
        }
    }
}

impl StudyMaterial {
    pub fn new(
        user_id: &str,
        title: &str,
        file_name: &str,
        extracted_text: Option<String>,
    ) -> AppResult<Self> {
        let file_type = MaterialType::from_file_name(file_name)?;
        let processed = extracted_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());

        Ok(StudyMaterial {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            file_name: file_name.to_string(),
            file_type,
            extracted_text,
            uploaded_at: Utc::now(),
            processed,
        })
    }

    /// Text usable as model input, if any was extracted.
    pub fn usable_text(&self) -> Option<&str> {
        self.extracted_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}
