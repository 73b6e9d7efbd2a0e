use cms_backend::application::ports::storage::{BlobNamespace, BlobStore, ImageUpload};
use cms_backend::domain::article::ImageReference;
use cms_backend::infrastructure::storage::LocalBlobStore;
use tempfile::TempDir;

mod support;

use support::png_bytes;

fn store(dir: &TempDir) -> LocalBlobStore {
    LocalBlobStore::new(
        dir.path().join("public"),
        dir.path().join("staging"),
        "http://cms.test",
    )
}

fn upload(name: &str) -> ImageUpload {
    ImageUpload::new(name, Some("image/png".into()), png_bytes(name))
}

/// Staged files are invisible until promoted.
#[tokio::test]
async fn stage_then_promote_moves_file_into_public_namespace() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    let staged = store
        .stage(BlobNamespace::Banner, &upload("Photo.PNG"))
        .await
        .unwrap();
    let reference = staged.reference.as_str().to_string();
    assert!(reference.starts_with("http://cms.test/storage/banner/"));
    assert!(reference.ends_with(".png"));

    let relative = store.relative_path(&staged.reference).unwrap();
    let public = store.public_root().join(&relative);
    assert!(!public.exists());

    store.promote(&staged).await.unwrap();
    assert!(public.exists());
    assert_eq!(std::fs::read(&public).unwrap(), png_bytes("Photo.PNG"));
    assert!(!dir.path().join("staging").join(&staged.staging_key).exists());
}

#[tokio::test]
async fn discard_removes_staged_file() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    let staged = store
        .stage(BlobNamespace::Media, &upload("a.png"))
        .await
        .unwrap();
    let staged_path = dir.path().join("staging").join(&staged.staging_key);
    assert!(staged_path.exists());

    store.discard(&staged).await.unwrap();
    assert!(!staged_path.exists());
    store.discard(&staged).await.unwrap();
}

#[tokio::test]
async fn delete_is_idempotent_and_rejects_foreign_references() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    let staged = store
        .stage(BlobNamespace::Media, &upload("a.png"))
        .await
        .unwrap();
    store.promote(&staged).await.unwrap();

    store.delete(&staged.reference).await.unwrap();
    let public = store
        .public_root()
        .join(store.relative_path(&staged.reference).unwrap());
    assert!(!public.exists());
    store.delete(&staged.reference).await.unwrap();

    let foreign = ImageReference::new("https://elsewhere.test/storage/media/x.png").unwrap();
    assert!(store.delete(&foreign).await.is_err());
}

#[tokio::test]
async fn file_names_are_unique_per_upload() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    let a = store.stage(BlobNamespace::Media, &upload("same.png")).await.unwrap();
    let b = store.stage(BlobNamespace::Media, &upload("same.png")).await.unwrap();
    assert_ne!(a.reference, b.reference);
}
