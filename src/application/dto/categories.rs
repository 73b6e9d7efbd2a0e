use crate::domain::category::{Category, CategoryWithCount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Present on read and list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles_count: Option<u64>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into(),
            name: category.name.into_inner(),
            description: category.description.into_inner(),
            articles_count: None,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl From<CategoryWithCount> for CategoryDto {
    fn from(value: CategoryWithCount) -> Self {
        let mut dto = Self::from(value.category);
        dto.articles_count = Some(value.articles_count);
        dto
    }
}
