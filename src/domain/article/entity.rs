// src/domain/article/entity.rs
use crate::domain::article::services::CategorySync;
use crate::domain::article::value_objects::{
    ArticleContent, ArticleId, ArticleTitle, ImageReference, MediaId,
};
use crate::domain::category::{CategoryId, CategorySummary};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub banner: ImageReference,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One gallery image, owned by exactly one article.
#[derive(Debug, Clone)]
pub struct Media {
    pub id: MediaId,
    pub article_id: ArticleId,
    pub image: ImageReference,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An article with its category associations and media gallery loaded.
#[derive(Debug, Clone)]
pub struct ArticleDetails {
    pub article: Article,
    pub categories: Vec<CategorySummary>,
    pub media: Vec<Media>,
}

impl ArticleDetails {
    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|c| c.id).collect()
    }

    pub fn media_references(&self) -> Vec<ImageReference> {
        self.media.iter().map(|m| m.image.clone()).collect()
    }

    /// Every blob this article keeps alive: media first, then the banner.
    pub fn owned_references(&self) -> Vec<ImageReference> {
        let mut refs = self.media_references();
        refs.push(self.article.banner.clone());
        refs
    }
}

/// Listing row: the article and its categories, without the gallery.
#[derive(Debug, Clone)]
pub struct ArticleListItem {
    pub article: Article,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub banner: ImageReference,
    pub category_ids: Vec<CategoryId>,
    pub media: Vec<ImageReference>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row-level changes applied to an article in a single transaction.
///
/// `banner` and `media` are `None` when the caller left them untouched;
/// `Some(media)` replaces the whole gallery.
#[derive(Debug, Clone)]
pub struct ArticleChangeset {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub banner: Option<ImageReference>,
    pub media: Option<Vec<ImageReference>>,
    pub categories: CategorySync,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleListFilter {
    pub category: Option<CategoryId>,
}
