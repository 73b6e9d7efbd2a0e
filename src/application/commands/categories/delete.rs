use super::CategoryCommandService;
use crate::application::{dto::CategoryDto, error::ApplicationResult};

pub struct DeleteCategoryCommand {
    pub id: i64,
}

impl CategoryCommandService {
    /// Association rows go with the category; the articles themselves stay.
    pub async fn delete_category(
        &self,
        command: DeleteCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let existing = self.load_existing(command.id).await?;
        self.repo.delete(existing.id).await?;
        tracing::info!(category_id = %existing.id, "category deleted");
        Ok(existing.into())
    }
}
