// src/application/commands/articles/update.rs
use super::{
    ArticleCommandService,
    fields::{check_gallery, check_image},
    staging::{StagedUploads, remove_unreferenced},
};
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
        ports::storage::{BlobNamespace, ImageUpload},
        validation::FieldErrors,
    },
    domain::article::{
        ArticleChangeset, ArticleContent, ArticleTitle, CategorySync, ImageReference,
    },
};

pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// `None` keeps the current banner.
    pub banner: Option<ImageUpload>,
    /// Empty keeps the current gallery; otherwise replaces it wholesale.
    pub media: Vec<ImageUpload>,
    pub category_ids: Vec<i64>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let existing = self.load_existing(command.id).await?;
        let article_id = existing.article.id;

        let UpdateArticleCommand {
            id: _,
            title,
            content,
            banner,
            media,
            category_ids,
        } = command;

        let mut errors = FieldErrors::new();
        let title = errors.check("title", ArticleTitle::new(title));
        let content = errors.check("content", ArticleContent::new(content));
        if let Some(upload) = &banner {
            check_image(&mut errors, "banner", upload);
        }
        check_gallery(&mut errors, &media);
        let category_ids = self.check_categories(&mut errors, &category_ids).await?;

        let (Some(title), Some(content)) = (title, content) else {
            return Err(ApplicationError::InvalidFields(errors));
        };
        errors.into_result()?;

        let mut uploads = StagedUploads::new(self.blob_store.as_ref());
        let (new_banner, new_media) =
            match stage_replacements(&mut uploads, banner.as_ref(), &media).await {
                Ok(refs) => refs,
                Err(err) => {
                    uploads.discard_all().await;
                    return Err(err);
                }
            };

        let mut replaced = Vec::new();
        if new_banner.is_some() {
            replaced.push(existing.article.banner.clone());
        }
        if new_media.is_some() {
            replaced.extend(existing.media_references());
        }

        let changeset = ArticleChangeset {
            id: article_id,
            title,
            content,
            banner: new_banner,
            media: new_media,
            categories: CategorySync::between(&existing.category_ids(), &category_ids),
            updated_at: self.clock.now(),
        };

        match self.write_repo.update(changeset).await {
            Ok(updated) => {
                uploads.promote_all(article_id).await;
                remove_unreferenced(self.blob_store.as_ref(), article_id, &replaced).await;
                tracing::info!(
                    %article_id,
                    replaced_images = replaced.len(),
                    "article updated"
                );
                Ok(updated.into())
            }
            Err(err) => {
                tracing::warn!(%article_id, error = %err, "article update failed; discarding staged images");
                uploads.discard_all().await;
                Err(err.into())
            }
        }
    }
}

async fn stage_replacements(
    uploads: &mut StagedUploads<'_>,
    banner: Option<&ImageUpload>,
    media: &[ImageUpload],
) -> ApplicationResult<(Option<ImageReference>, Option<Vec<ImageReference>>)> {
    let banner_ref = match banner {
        Some(upload) => Some(uploads.stage(BlobNamespace::Banner, upload).await?),
        None => None,
    };
    let media_refs = if media.is_empty() {
        None
    } else {
        Some(uploads.stage_gallery(media).await?)
    };
    Ok((banner_ref, media_refs))
}
