// tests/support/builders.rs
use axum::body::Body;
use cms_backend::application::{
    commands::articles::CreateArticleCommand,
    commands::categories::CreateCategoryCommand,
    ports::storage::ImageUpload,
    services::ApplicationServices,
};

const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_HEADER: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

pub fn png_bytes(tag: &str) -> Vec<u8> {
    let mut bytes = PNG_HEADER.to_vec();
    bytes.extend_from_slice(tag.as_bytes());
    bytes
}

pub fn png(name: &str) -> ImageUpload {
    ImageUpload::new(name, Some("image/png".into()), png_bytes(name))
}

pub fn jpeg(name: &str) -> ImageUpload {
    let mut bytes = JPEG_HEADER.to_vec();
    bytes.extend_from_slice(name.as_bytes());
    ImageUpload::new(name, Some("image/jpeg".into()), bytes)
}

pub fn text_file(name: &str) -> ImageUpload {
    ImageUpload::new(name, Some("text/plain".into()), b"just some words".to_vec())
}

pub async fn seed_category(services: &ApplicationServices, name: &str) -> i64 {
    services
        .category_commands
        .create_category(CreateCategoryCommand {
            name: name.into(),
            description: format!("{name} articles"),
        })
        .await
        .expect("seed category")
        .id
}

/// A valid create command: one banner, `media` gallery images and the given
/// categories.
pub fn article_command(title: &str, media: usize, categories: &[i64]) -> CreateArticleCommand {
    let mut builder = CreateArticleCommand::builder()
        .title(title)
        .content(format!("{title} body"))
        .banner(png("banner.png"));
    for i in 0..media {
        builder = builder.media(jpeg(&format!("gallery-{i}.jpg")));
    }
    for id in categories {
        builder = builder.category(*id);
    }
    builder.build().expect("complete command")
}

pub const BOUNDARY: &str = "cms-test-boundary";

/// Minimal `multipart/form-data` encoder for router tests.
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn finish(mut self) -> Body {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(self.buf)
    }
}
