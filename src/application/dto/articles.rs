use crate::domain::article::{Article, ArticleDetails, ArticleListItem, Media};
use crate::domain::category::CategorySummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategorySummaryDto {
    pub id: i64,
    pub name: String,
}

impl From<CategorySummary> for CategorySummaryDto {
    fn from(summary: CategorySummary) -> Self {
        Self {
            id: summary.id.into(),
            name: summary.name.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaDto {
    pub id: i64,
    pub article_id: i64,
    pub image: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Media> for MediaDto {
    fn from(media: Media) -> Self {
        Self {
            id: media.id.into(),
            article_id: media.article_id.into(),
            image: media.image.into_inner(),
            created_at: media.created_at,
            updated_at: media.updated_at,
        }
    }
}

/// Full article payload with categories and media gallery.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub banner: String,
    pub categories: Vec<CategorySummaryDto>,
    pub media: Vec<MediaDto>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleDetails> for ArticleDto {
    fn from(details: ArticleDetails) -> Self {
        let ArticleDetails {
            article,
            categories,
            media,
        } = details;
        let Article {
            id,
            title,
            content,
            banner,
            created_at,
            updated_at,
        } = article;

        Self {
            id: id.into(),
            title: title.into_inner(),
            content: content.into_inner(),
            banner: banner.into_inner(),
            categories: categories.into_iter().map(Into::into).collect(),
            media: media.into_iter().map(Into::into).collect(),
            created_at,
            updated_at,
        }
    }
}

/// Listing payload: like [`ArticleDto`] without the gallery.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleSummaryDto {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub banner: String,
    pub categories: Vec<CategorySummaryDto>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleListItem> for ArticleSummaryDto {
    fn from(item: ArticleListItem) -> Self {
        let ArticleListItem {
            article,
            categories,
        } = item;

        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            content: article.content.into_inner(),
            banner: article.banner.into_inner(),
            categories: categories.into_iter().map(Into::into).collect(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
