use crate::domain::article::entity::{
    ArticleChangeset, ArticleDetails, ArticleListFilter, ArticleListItem, NewArticle,
};
use crate::domain::article::value_objects::ArticleId;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Every method runs its row mutations inside one database transaction.
#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<ArticleDetails>;
    async fn update(&self, changeset: ArticleChangeset) -> DomainResult<ArticleDetails>;
    /// Removes media rows, category associations and the article row.
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<ArticleDetails>>;
    /// `page` is 1-based. Returns the page items and the total row count.
    async fn list_page(
        &self,
        filter: ArticleListFilter,
        page: u32,
        page_size: u32,
    ) -> DomainResult<(Vec<ArticleListItem>, u64)>;
}
