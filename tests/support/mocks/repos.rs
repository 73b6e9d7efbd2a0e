// tests/support/mocks/repos.rs
use async_trait::async_trait;
use cms_backend::domain::article::{
    ArticleChangeset, ArticleDetails, ArticleId, ArticleWriteRepository, NewArticle,
};
use cms_backend::domain::category::{
    Category, CategoryId, CategoryName, CategoryRepository, CategoryUpdate, CategoryWithCount,
    NewCategory,
};
use cms_backend::domain::errors::{DomainError, DomainResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Wraps a real write repository and makes its row transactions fail on
/// demand. Deletes always pass through.
pub struct FailingArticleWrite {
    inner: Arc<dyn ArticleWriteRepository>,
    failing: AtomicBool,
}

impl FailingArticleWrite {
    pub fn new(inner: Arc<dyn ArticleWriteRepository>) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
        }
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> DomainResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(DomainError::Persistence("database is locked".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ArticleWriteRepository for FailingArticleWrite {
    async fn insert(&self, article: NewArticle) -> DomainResult<ArticleDetails> {
        self.check()?;
        self.inner.insert(article).await
    }

    async fn update(&self, changeset: ArticleChangeset) -> DomainResult<ArticleDetails> {
        self.check()?;
        self.inner.update(changeset).await
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        self.inner.delete(id).await
    }
}

/// Wraps a real category repository. While `skip_existence_check` is on,
/// `find_missing` reports every id as present, so unknown ids reach the row
/// transaction as if their category vanished after validation.
pub struct StaleCategoryCheck {
    inner: Arc<dyn CategoryRepository>,
    skipping: AtomicBool,
}

impl StaleCategoryCheck {
    pub fn new(inner: Arc<dyn CategoryRepository>) -> Self {
        Self {
            inner,
            skipping: AtomicBool::new(false),
        }
    }

    pub fn skip_existence_check(&self, skip: bool) {
        self.skipping.store(skip, Ordering::SeqCst);
    }
}

#[async_trait]
impl CategoryRepository for StaleCategoryCheck {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        self.inner.insert(category).await
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        self.inner.update(update).await
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        self.inner.find_by_id(id).await
    }

    async fn find_with_count(&self, id: CategoryId) -> DomainResult<Option<CategoryWithCount>> {
        self.inner.find_with_count(id).await
    }

    async fn find_by_name(&self, name: &CategoryName) -> DomainResult<Option<Category>> {
        self.inner.find_by_name(name).await
    }

    async fn list_with_counts(&self) -> DomainResult<Vec<CategoryWithCount>> {
        self.inner.list_with_counts().await
    }

    async fn find_missing(&self, ids: &[CategoryId]) -> DomainResult<Vec<CategoryId>> {
        if self.skipping.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        self.inner.find_missing(ids).await
    }
}
