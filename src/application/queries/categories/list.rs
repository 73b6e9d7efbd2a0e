use super::CategoryQueryService;
use crate::application::{dto::CategoryDto, error::ApplicationResult};

impl CategoryQueryService {
    /// All categories with article counts, newest first.
    pub async fn list_categories(&self) -> ApplicationResult<Vec<CategoryDto>> {
        let records = self.repo.list_with_counts().await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
