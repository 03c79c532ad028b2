use async_trait::async_trait;
use thiserror::Error;

/// Image formats the service accepts. `image/jpg` is tolerated as an alias
/// for JPEG since browsers still emit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
}

impl ImageFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "image/webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageIngestionError {
    #[error("An image is required")]
    Missing,
    #[error("Invalid image payload: {0}")]
    InvalidPayload(String),
    #[error("Image size must be less than {limit_mb}MB")]
    Oversized { size: usize, limit_mb: usize },
    #[error("Only .jpg, .jpeg, .png and .webp formats are supported")]
    UnsupportedFormat,
    #[error("Image upload failed: {0}")]
    Upload(String),
}

/// A single upload to the external image host.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    /// Logical folder on the host, chosen by the caller.
    pub folder: String,
    /// Collision-resistant identifier, extension stripped.
    pub public_id: String,
}

/// External image-hosting collaborator. Accepts binary image data and returns
/// a durable, publicly resolvable URL.
#[async_trait]
pub trait ImageHosting: Send + Sync {
    async fn upload(&self, upload: ImageUpload) -> Result<String, ImageIngestionError>;
}
