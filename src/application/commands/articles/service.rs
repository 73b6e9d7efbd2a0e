// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{storage::BlobStore, time::Clock},
    },
    domain::{
        article::{ArticleDetails, ArticleId, ArticleReadRepository, ArticleWriteRepository},
        category::CategoryRepository,
    },
};

/// Creates, updates and deletes articles together with their banner, media
/// gallery and category associations.
pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) blob_store: Arc<dyn BlobStore>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        blob_store: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            category_repo,
            blob_store,
            clock,
        }
    }

    pub(super) async fn load_existing(&self, raw_id: i64) -> ApplicationResult<ArticleDetails> {
        let not_found = || ApplicationError::not_found("article not found");
        let id = ArticleId::new(raw_id).map_err(|_| not_found())?;
        self.read_repo.find_by_id(id).await?.ok_or_else(not_found)
    }
}
