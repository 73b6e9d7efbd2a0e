use super::CategoryQueryService;
use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::category::CategoryId,
};

pub struct GetCategoryByIdQuery {
    pub id: i64,
}

impl CategoryQueryService {
    /// The category with its article count.
    pub async fn get_category_by_id(
        &self,
        query: GetCategoryByIdQuery,
    ) -> ApplicationResult<CategoryDto> {
        let not_found = || ApplicationError::not_found("category not found");
        let id = CategoryId::new(query.id).map_err(|_| not_found())?;
        let found = self.repo.find_with_count(id).await?.ok_or_else(not_found)?;
        Ok(found.into())
    }
}
