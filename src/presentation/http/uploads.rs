// src/presentation/http/uploads.rs
use crate::application::{ports::storage::ImageUpload, validation::FieldErrors};
use crate::presentation::http::error::{HttpError, HttpResult};
use axum::extract::Multipart;

/// Article fields as submitted in a `multipart/form-data` body.
#[derive(Debug, Default)]
pub struct ArticleForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub banner: Option<ImageUpload>,
    pub media: Vec<ImageUpload>,
    pub categories: Vec<String>,
}

impl ArticleForm {
    pub async fn from_multipart(mut multipart: Multipart) -> HttpResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(HttpError::from_multipart)?
        {
            let name = field.name().map(str::to_owned).unwrap_or_default();
            match name.as_str() {
                "title" => form.title = Some(field.text().await.map_err(HttpError::from_multipart)?),
                "content" => {
                    form.content = Some(field.text().await.map_err(HttpError::from_multipart)?)
                }
                "category" | "category[]" => {
                    let value = field.text().await.map_err(HttpError::from_multipart)?;
                    form.categories.push(value.trim().to_string());
                }
                "banner" | "media" | "media[]" => {
                    let file_name = field.file_name().map(str::to_owned).unwrap_or_default();
                    let content_type = field.content_type().map(str::to_owned);
                    let bytes = field.bytes().await.map_err(HttpError::from_multipart)?;
                    // browsers send an empty part for an untouched file input
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    let upload = ImageUpload::new(file_name, content_type, bytes);
                    if name == "banner" {
                        form.banner = Some(upload);
                    } else {
                        form.media.push(upload);
                    }
                }
                other => tracing::debug!(field = other, "ignoring unknown multipart field"),
            }
        }

        Ok(form)
    }

    /// Parses the submitted category ids, reporting non-numeric entries under
    /// `category.{index}`.
    pub fn category_ids(&self) -> HttpResult<Vec<i64>> {
        let mut errors = FieldErrors::new();
        let mut ids = Vec::with_capacity(self.categories.len());
        for (index, raw) in self.categories.iter().enumerate() {
            match raw.parse::<i64>() {
                Ok(id) => ids.push(id),
                Err(_) => errors.add(format!("category.{index}"), "category not available"),
            }
        }

        if errors.is_empty() {
            Ok(ids)
        } else {
            Err(HttpError::invalid_fields(errors))
        }
    }
}
