use super::CategoryCommandService;
use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
        validation::FieldErrors,
    },
    domain::category::{CategoryDescription, CategoryName, CategoryUpdate},
};

pub struct UpdateCategoryCommand {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl CategoryCommandService {
    pub async fn update_category(
        &self,
        command: UpdateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let existing = self.load_existing(command.id).await?;

        let mut errors = FieldErrors::new();
        let name = errors.check("name", CategoryName::new(command.name));
        let description =
            errors.check("description", CategoryDescription::new(command.description));
        if let Some(name) = &name {
            self.check_unique_name(&mut errors, name, Some(existing.id))
                .await?;
        }

        let (Some(name), Some(description)) = (name, description) else {
            return Err(ApplicationError::InvalidFields(errors));
        };
        errors.into_result()?;

        let updated = self
            .repo
            .update(CategoryUpdate {
                id: existing.id,
                name,
                description,
                updated_at: self.clock.now(),
            })
            .await?;

        tracing::info!(category_id = %updated.id, "category updated");
        Ok(updated.into())
    }
}
