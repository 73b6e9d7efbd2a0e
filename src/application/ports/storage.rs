// src/application/ports/storage.rs
use crate::application::ApplicationResult;
use crate::domain::article::ImageReference;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;

pub const ACCEPTED_IMAGE_EXTENSIONS: [&str; 3] = ["jpeg", "png", "jpg"];

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Directory an image is filed under inside the blob store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobNamespace {
    Banner,
    Media,
}

impl BlobNamespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Media => "media",
        }
    }
}

impl fmt::Display for BlobNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Lower-cased extension of the client file name, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Accepts JPEG and PNG content carrying a jpeg/jpg/png extension.
    pub fn validate(&self) -> Result<(), String> {
        let looks_like_image =
            self.bytes.starts_with(JPEG_MAGIC) || self.bytes.starts_with(PNG_MAGIC);
        if !looks_like_image {
            return Err("file must be an image".into());
        }

        match self.extension() {
            Some(ext) if ACCEPTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err("only jpeg, png, jpg files are accepted".into()),
        }
    }
}

/// A file written to the staging area. Its final `reference` is fixed at
/// staging time so rows can point at it before the file is promoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedBlob {
    pub namespace: BlobNamespace,
    pub reference: ImageReference,
    pub staging_key: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn stage(
        &self,
        namespace: BlobNamespace,
        upload: &ImageUpload,
    ) -> ApplicationResult<StagedBlob>;
    /// Moves a staged file to its public location.
    async fn promote(&self, staged: &StagedBlob) -> ApplicationResult<()>;
    async fn discard(&self, staged: &StagedBlob) -> ApplicationResult<()>;
    /// Removes a promoted file. Deleting a missing file is not an error.
    async fn delete(&self, reference: &ImageReference) -> ApplicationResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> ImageUpload {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(b"rest");
        ImageUpload::new(name, Some("image/png".into()), bytes)
    }

    #[test]
    fn accepts_png_and_jpeg_with_matching_extensions() {
        assert!(png("a.png").validate().is_ok());
        assert!(png("a.JPG").validate().is_ok());
        let jpeg = ImageUpload::new("photo.jpeg", None, vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert!(jpeg.validate().is_ok());
    }

    #[test]
    fn rejects_non_image_content() {
        let text = ImageUpload::new("notes.png", None, b"hello".to_vec());
        assert_eq!(text.validate().unwrap_err(), "file must be an image");
        let empty = ImageUpload::new("empty.png", None, Vec::new());
        assert!(empty.validate().is_err());
    }

    #[test]
    fn rejects_unlisted_extensions() {
        assert_eq!(
            png("picture.gif").validate().unwrap_err(),
            "only jpeg, png, jpg files are accepted"
        );
        assert!(png("no_extension").validate().is_err());
        assert!(png(".png").validate().is_err());
    }

    #[test]
    fn namespaces_render_as_directory_names() {
        assert_eq!(BlobNamespace::Banner.to_string(), "banner");
        assert_eq!(BlobNamespace::Media.as_str(), "media");
    }
}
