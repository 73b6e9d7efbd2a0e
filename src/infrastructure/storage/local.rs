use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::storage::{BlobNamespace, BlobStore, ImageUpload, StagedBlob},
};
use crate::domain::article::ImageReference;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Blob store backed by the local filesystem.
///
/// Uploads land in `staging_dir` first and are renamed into
/// `public_root/{namespace}/` on promotion. Public references have the form
/// `{public_base_url}/storage/{namespace}/{file}`, which is also where the
/// HTTP layer serves `public_root` from.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    public_root: PathBuf,
    staging_dir: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(
        public_root: impl Into<PathBuf>,
        staging_dir: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
    ) -> Self {
        let public_base_url: String = public_base_url.into();
        Self {
            public_root: public_root.into(),
            staging_dir: staging_dir.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn public_root(&self) -> &Path {
        &self.public_root
    }

    fn reference_prefix(&self) -> String {
        format!("{}/storage/", self.public_base_url)
    }

    /// Path under `public_root` that a reference points at, or `None` when the
    /// reference was not issued by this store.
    pub fn relative_path(&self, reference: &ImageReference) -> Option<PathBuf> {
        let relative = reference.as_str().strip_prefix(&self.reference_prefix())?;
        let path = PathBuf::from(relative);
        let safe = !relative.is_empty()
            && path
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        safe.then_some(path)
    }

    fn staging_path(&self, staged: &StagedBlob) -> PathBuf {
        self.staging_dir.join(&staged.staging_key)
    }

    fn public_path(&self, staged: &StagedBlob) -> ApplicationResult<PathBuf> {
        self.relative_path(&staged.reference)
            .map(|relative| self.public_root.join(relative))
            .ok_or_else(|| {
                ApplicationError::infrastructure(format!(
                    "staged reference {} is outside the public storage root",
                    staged.reference
                ))
            })
    }
}

fn io_failure(action: &str, path: &Path, err: std::io::Error) -> ApplicationError {
    ApplicationError::infrastructure(format!("failed to {action} {}: {err}", path.display()))
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn stage(
        &self,
        namespace: BlobNamespace,
        upload: &ImageUpload,
    ) -> ApplicationResult<StagedBlob> {
        let extension = upload
            .extension()
            .ok_or_else(|| ApplicationError::validation("uploaded file has no extension"))?;
        let file_name = format!("{}.{extension}", Uuid::new_v4().simple());

        tokio::fs::create_dir_all(&self.staging_dir)
            .await
            .map_err(|err| io_failure("create staging directory", &self.staging_dir, err))?;

        let staging_key = format!("{namespace}-{file_name}");
        let target = self.staging_dir.join(&staging_key);
        tokio::fs::write(&target, &upload.bytes)
            .await
            .map_err(|err| io_failure("write staged file", &target, err))?;

        let reference =
            ImageReference::new(format!("{}{namespace}/{file_name}", self.reference_prefix()))?;

        tracing::debug!(%reference, staging_key = %staging_key, "image staged");
        Ok(StagedBlob {
            namespace,
            reference,
            staging_key,
        })
    }

    async fn promote(&self, staged: &StagedBlob) -> ApplicationResult<()> {
        let source = self.staging_path(staged);
        let target = self.public_path(staged)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| io_failure("create storage directory", parent, err))?;
        }

        if tokio::fs::rename(&source, &target).await.is_err() {
            // rename fails across filesystems; fall back to copy + remove
            tokio::fs::copy(&source, &target)
                .await
                .map_err(|err| io_failure("promote staged file", &source, err))?;
            remove_staged_copy(&source, &staged.staging_key).await;
        }
        Ok(())
    }

    async fn discard(&self, staged: &StagedBlob) -> ApplicationResult<()> {
        let path = self.staging_path(staged);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_failure("discard staged file", &path, err)),
        }
    }

    async fn delete(&self, reference: &ImageReference) -> ApplicationResult<()> {
        let relative = self.relative_path(reference).ok_or_else(|| {
            ApplicationError::validation(format!("reference {reference} is not managed by this store"))
        })?;
        let path = self.public_root.join(relative);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_failure("delete file", &path, err)),
        }
    }
}

/// Removes a staged file whose content already reached public storage.
/// Returns false when the file is left behind.
async fn remove_staged_copy(source: &Path, staging_key: &str) -> bool {
    match tokio::fs::remove_file(source).await {
        Ok(()) => true,
        Err(err) if err.kind() == ErrorKind::NotFound => true,
        Err(err) => {
            tracing::warn!(
                staging_key = %staging_key,
                path = %source.display(),
                error = %err,
                "failed to remove promoted staging copy; orphaned blob left behind"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LocalBlobStore {
        LocalBlobStore::new("/srv/public", "/srv/staging", "http://cms.test/")
    }

    #[test]
    fn relative_path_strips_public_prefix() {
        let reference = ImageReference::new("http://cms.test/storage/banner/a.png").unwrap();
        assert_eq!(
            store().relative_path(&reference),
            Some(PathBuf::from("banner/a.png"))
        );
    }

    #[test]
    fn relative_path_rejects_foreign_or_escaping_references() {
        let foreign = ImageReference::new("http://elsewhere.test/storage/banner/a.png").unwrap();
        assert_eq!(store().relative_path(&foreign), None);

        let escaping = ImageReference::new("http://cms.test/storage/../secret.png").unwrap();
        assert_eq!(store().relative_path(&escaping), None);

        let absolute = ImageReference::new("http://cms.test/storage//etc/passwd").unwrap();
        assert_eq!(store().relative_path(&absolute), None);
    }

    #[tokio::test]
    async fn staged_copy_removal_reports_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("banner-a.png");
        tokio::fs::write(&file, b"png").await.unwrap();

        assert!(remove_staged_copy(&file, "banner-a.png").await);
        assert!(!file.exists());
        assert!(remove_staged_copy(&file, "banner-a.png").await);

        // a directory cannot be removed as a file, so it stays behind
        let stuck = dir.path().join("media-b.png");
        tokio::fs::create_dir(&stuck).await.unwrap();
        assert!(!remove_staged_copy(&stuck, "media-b.png").await);
        assert!(stuck.exists());
    }
}
