// tests/support/mocks/storage.rs
use async_trait::async_trait;
use bytes::Bytes;
use cms_backend::application::{
    error::{ApplicationError, ApplicationResult},
    ports::storage::{BlobNamespace, BlobStore, ImageUpload, StagedBlob},
};
use cms_backend::domain::article::ImageReference;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub const TEST_BASE_URL: &str = "http://cms.test";

#[derive(Default)]
struct Blobs {
    staged: BTreeMap<String, (ImageReference, Bytes)>,
    stored: BTreeMap<String, Bytes>,
    deleted: BTreeSet<String>,
}

/// Blob store kept entirely in memory. Records what was staged, promoted
/// and deleted so tests can assert on the files an article left behind.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: Mutex<Blobs>,
    counter: AtomicU64,
    fail_stage: AtomicBool,
    fail_promote: AtomicBool,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_stage(&self, fail: bool) {
        self.fail_stage.store(fail, Ordering::SeqCst);
    }

    pub fn fail_promote(&self, fail: bool) {
        self.fail_promote.store(fail, Ordering::SeqCst);
    }

    /// References of promoted files still present.
    pub fn stored(&self) -> BTreeSet<String> {
        self.blobs.lock().unwrap().stored.keys().cloned().collect()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.blobs.lock().unwrap().stored.contains_key(reference)
    }

    pub fn staged_count(&self) -> usize {
        self.blobs.lock().unwrap().staged.len()
    }

    pub fn was_deleted(&self, reference: &str) -> bool {
        self.blobs.lock().unwrap().deleted.contains(reference)
    }

    pub fn is_empty(&self) -> bool {
        let blobs = self.blobs.lock().unwrap();
        blobs.stored.is_empty() && blobs.staged.is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn stage(
        &self,
        namespace: BlobNamespace,
        upload: &ImageUpload,
    ) -> ApplicationResult<StagedBlob> {
        if self.fail_stage.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure("staging area unavailable"));
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let ext = upload.extension().unwrap_or_else(|| "bin".into());
        let reference =
            ImageReference::new(format!("{TEST_BASE_URL}/storage/{namespace}/{n}.{ext}"))?;
        let staging_key = format!("staged-{n}");
        self.blobs.lock().unwrap().staged.insert(
            staging_key.clone(),
            (reference.clone(), upload.bytes.clone()),
        );
        Ok(StagedBlob {
            namespace,
            reference,
            staging_key,
        })
    }

    async fn promote(&self, staged: &StagedBlob) -> ApplicationResult<()> {
        if self.fail_promote.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure("rename failed"));
        }
        let mut blobs = self.blobs.lock().unwrap();
        let (reference, bytes) = blobs
            .staged
            .remove(&staged.staging_key)
            .ok_or_else(|| ApplicationError::infrastructure("nothing staged under that key"))?;
        blobs.stored.insert(reference.into_inner(), bytes);
        Ok(())
    }

    async fn discard(&self, staged: &StagedBlob) -> ApplicationResult<()> {
        self.blobs.lock().unwrap().staged.remove(&staged.staging_key);
        Ok(())
    }

    async fn delete(&self, reference: &ImageReference) -> ApplicationResult<()> {
        let mut blobs = self.blobs.lock().unwrap();
        blobs.stored.remove(reference.as_str());
        blobs.deleted.insert(reference.to_string());
        Ok(())
    }
}
