// src/application/commands/articles/delete.rs
use super::{ArticleCommandService, staging::remove_unreferenced};
use crate::application::{dto::ArticleDto, error::ApplicationResult};

pub struct DeleteArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    /// Returns the article as it was just before deletion.
    pub async fn delete_article(
        &self,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let existing = self.load_existing(command.id).await?;
        let article_id = existing.article.id;

        self.write_repo.delete(article_id).await?;

        let owned = existing.owned_references();
        remove_unreferenced(self.blob_store.as_ref(), article_id, &owned).await;
        tracing::info!(%article_id, removed_images = owned.len(), "article deleted");

        Ok(existing.into())
    }
}
