// src/application/commands/articles/staging.rs
use crate::{
    application::{
        error::ApplicationResult,
        ports::storage::{BlobNamespace, BlobStore, ImageUpload, StagedBlob},
    },
    domain::article::{ArticleId, ImageReference},
};

/// Files staged for one article operation. They are promoted once the row
/// transaction commits and discarded if it fails.
pub(super) struct StagedUploads<'a> {
    store: &'a dyn BlobStore,
    staged: Vec<StagedBlob>,
}

impl<'a> StagedUploads<'a> {
    pub(super) fn new(store: &'a dyn BlobStore) -> Self {
        Self {
            store,
            staged: Vec::new(),
        }
    }

    pub(super) async fn stage(
        &mut self,
        namespace: BlobNamespace,
        upload: &ImageUpload,
    ) -> ApplicationResult<ImageReference> {
        let staged = self.store.stage(namespace, upload).await?;
        let reference = staged.reference.clone();
        self.staged.push(staged);
        Ok(reference)
    }

    pub(super) async fn stage_gallery(
        &mut self,
        media: &[ImageUpload],
    ) -> ApplicationResult<Vec<ImageReference>> {
        let mut references = Vec::with_capacity(media.len());
        for upload in media {
            references.push(self.stage(BlobNamespace::Media, upload).await?);
        }
        Ok(references)
    }

    pub(super) async fn promote_all(self, article_id: ArticleId) {
        for staged in &self.staged {
            if let Err(err) = self.store.promote(staged).await {
                tracing::error!(
                    %article_id,
                    reference = %staged.reference,
                    error = %err,
                    "staged image could not be promoted; article references a missing file"
                );
            }
        }
    }

    pub(super) async fn discard_all(self) {
        for staged in &self.staged {
            if let Err(err) = self.store.discard(staged).await {
                tracing::warn!(
                    reference = %staged.reference,
                    staging_key = %staged.staging_key,
                    error = %err,
                    "failed to discard staged image; orphaned blob left behind"
                );
            }
        }
    }
}

/// Deletes images that are no longer referenced by any row.
pub(super) async fn remove_unreferenced(
    store: &dyn BlobStore,
    article_id: ArticleId,
    references: &[ImageReference],
) {
    for reference in references {
        if let Err(err) = store.delete(reference).await {
            tracing::warn!(
                %article_id,
                %reference,
                error = %err,
                "failed to delete unreferenced image; orphaned blob left behind"
            );
        }
    }
}
