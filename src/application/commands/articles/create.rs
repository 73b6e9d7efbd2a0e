// src/application/commands/articles/create.rs
use super::{
    ArticleCommandService,
    fields::{check_gallery, check_image},
    staging::StagedUploads,
};
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
        ports::storage::{BlobNamespace, ImageUpload},
        validation::FieldErrors,
    },
    domain::article::{ArticleContent, ArticleTitle, ImageReference, NewArticle},
};

pub struct CreateArticleCommand {
    pub title: String,
    pub content: String,
    pub banner: Option<ImageUpload>,
    pub media: Vec<ImageUpload>,
    pub category_ids: Vec<i64>,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    content: Option<String>,
    banner: Option<ImageUpload>,
    media: Vec<ImageUpload>,
    category_ids: Vec<i64>,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn banner(mut self, banner: ImageUpload) -> Self {
        self.banner = Some(banner);
        self
    }

    pub fn media(mut self, media: ImageUpload) -> Self {
        self.media.push(media);
        self
    }

    pub fn category(mut self, id: i64) -> Self {
        self.category_ids.push(id);
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            content: self.content.ok_or("content is required")?,
            banner: self.banner,
            media: self.media,
            category_ids: self.category_ids,
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let CreateArticleCommand {
            title,
            content,
            banner,
            media,
            category_ids,
        } = command;

        let mut errors = FieldErrors::new();
        let title = errors.check("title", ArticleTitle::new(title));
        let content = errors.check("content", ArticleContent::new(content));

        match &banner {
            Some(upload) => check_image(&mut errors, "banner", upload),
            None => errors.add("banner", "banner image is required"),
        }

        if media.is_empty() {
            errors.add("media", "at least one media image is required");
        } else {
            check_gallery(&mut errors, &media);
        }

        let category_ids = self.check_categories(&mut errors, &category_ids).await?;

        let (Some(title), Some(content), Some(banner)) = (title, content, banner) else {
            return Err(ApplicationError::InvalidFields(errors));
        };
        errors.into_result()?;

        let mut uploads = StagedUploads::new(self.blob_store.as_ref());
        let (banner_ref, media_refs) =
            match stage_article_files(&mut uploads, &banner, &media).await {
                Ok(refs) => refs,
                Err(err) => {
                    uploads.discard_all().await;
                    return Err(err);
                }
            };

        let now = self.clock.now();
        let new_article = NewArticle {
            title,
            content,
            banner: banner_ref,
            category_ids,
            media: media_refs,
            created_at: now,
            updated_at: now,
        };

        match self.write_repo.insert(new_article).await {
            Ok(created) => {
                let article_id = created.article.id;
                uploads.promote_all(article_id).await;
                tracing::info!(
                    %article_id,
                    media = created.media.len(),
                    categories = created.categories.len(),
                    "article created"
                );
                Ok(created.into())
            }
            Err(err) => {
                tracing::warn!(error = %err, "article insert failed; discarding staged images");
                uploads.discard_all().await;
                Err(err.into())
            }
        }
    }
}

async fn stage_article_files(
    uploads: &mut StagedUploads<'_>,
    banner: &ImageUpload,
    media: &[ImageUpload],
) -> ApplicationResult<(ImageReference, Vec<ImageReference>)> {
    let banner_ref = uploads.stage(BlobNamespace::Banner, banner).await?;
    let media_refs = uploads.stage_gallery(media).await?;
    Ok((banner_ref, media_refs))
}
