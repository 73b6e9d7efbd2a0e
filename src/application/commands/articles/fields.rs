use super::ArticleCommandService;
use crate::{
    application::{
        error::ApplicationResult, ports::storage::ImageUpload, validation::FieldErrors,
    },
    domain::{article::services::distinct_category_ids, category::CategoryId},
};

pub(super) fn check_image(errors: &mut FieldErrors, field: &str, upload: &ImageUpload) {
    if let Err(message) = upload.validate() {
        errors.add(field, message);
    }
}

pub(super) fn check_gallery(errors: &mut FieldErrors, media: &[ImageUpload]) {
    for (index, upload) in media.iter().enumerate() {
        check_image(errors, &format!("media.{index}"), upload);
    }
}

impl ArticleCommandService {
    /// Every id must name an existing category. Errors are keyed by the
    /// position of the offending id (`category.0`, `category.1`, ...).
    pub(super) async fn check_categories(
        &self,
        errors: &mut FieldErrors,
        raw_ids: &[i64],
    ) -> ApplicationResult<Vec<CategoryId>> {
        if raw_ids.is_empty() {
            errors.add("category", "at least one category is required");
            return Ok(Vec::new());
        }

        let mut candidates = Vec::with_capacity(raw_ids.len());
        for (index, raw) in raw_ids.iter().enumerate() {
            match CategoryId::new(*raw) {
                Ok(id) => candidates.push((index, id)),
                Err(_) => errors.add(format!("category.{index}"), "category not available"),
            }
        }

        let ids: Vec<CategoryId> = candidates.iter().map(|(_, id)| *id).collect();
        let missing = self
            .category_repo
            .find_missing(&distinct_category_ids(&ids))
            .await?;

        for (index, id) in &candidates {
            if missing.contains(id) {
                errors.add(format!("category.{index}"), "category not available");
            }
        }

        Ok(distinct_category_ids(&ids))
    }
}
