// src/application/commands/categories/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
        validation::FieldErrors,
    },
    domain::category::{Category, CategoryId, CategoryName, CategoryRepository},
};

pub struct CategoryCommandService {
    pub(super) repo: Arc<dyn CategoryRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl CategoryCommandService {
    pub fn new(repo: Arc<dyn CategoryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub(super) async fn load_existing(&self, raw_id: i64) -> ApplicationResult<Category> {
        let not_found = || ApplicationError::not_found("category not found");
        let id = CategoryId::new(raw_id).map_err(|_| not_found())?;
        self.repo.find_by_id(id).await?.ok_or_else(not_found)
    }

    /// Records a `name` error when another category already uses `name`.
    pub(super) async fn check_unique_name(
        &self,
        errors: &mut FieldErrors,
        name: &CategoryName,
        ignore: Option<CategoryId>,
    ) -> ApplicationResult<()> {
        if let Some(existing) = self.repo.find_by_name(name).await? {
            if Some(existing.id) != ignore {
                errors.add("name", "category name already exists");
            }
        }
        Ok(())
    }
}
