use crate::domain::category::entity::{
    Category, CategoryUpdate, CategoryWithCount, NewCategory,
};
use crate::domain::category::value_objects::{CategoryId, CategoryName};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category>;
    async fn delete(&self, id: CategoryId) -> DomainResult<()>;
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;
    async fn find_with_count(&self, id: CategoryId) -> DomainResult<Option<CategoryWithCount>>;
    async fn find_by_name(&self, name: &CategoryName) -> DomainResult<Option<Category>>;
    /// Newest first.
    async fn list_with_counts(&self) -> DomainResult<Vec<CategoryWithCount>>;
    /// Returns the subset of `ids` that has no matching category row.
    async fn find_missing(&self, ids: &[CategoryId]) -> DomainResult<Vec<CategoryId>>;
}
