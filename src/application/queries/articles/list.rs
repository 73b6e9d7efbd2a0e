use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleSummaryDto, Page, PageFilters},
        error::ApplicationResult,
    },
    domain::{article::ArticleListFilter, category::CategoryId},
};

const MAX_PAGE_SIZE: u32 = 100;

pub struct ListArticlesQuery {
    pub category: Option<i64>,
    /// 1-based; `0` is treated as the first page.
    pub page: u32,
    /// Supplied by the caller; clamped to `1..=MAX_PAGE_SIZE`.
    pub page_size: u32,
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        query: ListArticlesQuery,
    ) -> ApplicationResult<Page<ArticleSummaryDto>> {
        let page = query.page.max(1);
        let page_size = query.page_size.clamp(1, MAX_PAGE_SIZE);
        let filters = PageFilters {
            limit: page_size,
            category: query.category,
        };

        // No category row has a non-positive id, so nothing can match.
        let category = match query.category.map(CategoryId::new).transpose() {
            Ok(category) => category,
            Err(_) => return Ok(Page::new(Vec::new(), 0, page, filters)),
        };

        let (items, total) = self
            .read_repo
            .list_page(ArticleListFilter { category }, page, page_size)
            .await?;

        Ok(Page::new(
            items.into_iter().map(Into::into).collect(),
            total,
            page,
            filters,
        ))
    }
}
