use super::CategoryCommandService;
use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
        validation::FieldErrors,
    },
    domain::category::{CategoryDescription, CategoryName, NewCategory},
};

pub struct CreateCategoryCommand {
    pub name: String,
    pub description: String,
}

impl CategoryCommandService {
    pub async fn create_category(
        &self,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let mut errors = FieldErrors::new();
        let name = errors.check("name", CategoryName::new(command.name));
        let description =
            errors.check("description", CategoryDescription::new(command.description));
        if let Some(name) = &name {
            self.check_unique_name(&mut errors, name, None).await?;
        }

        let (Some(name), Some(description)) = (name, description) else {
            return Err(ApplicationError::InvalidFields(errors));
        };
        errors.into_result()?;

        let now = self.clock.now();
        let created = self
            .repo
            .insert(NewCategory {
                name,
                description,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(category_id = %created.id, "category created");
        Ok(created.into())
    }
}
