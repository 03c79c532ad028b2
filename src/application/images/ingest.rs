use crate::domain::images::{ImageFormat, ImageHosting, ImageIngestionError, ImageUpload};
use crate::domain::schools::SchoolImage;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;
use time::OffsetDateTime;

/// An image as it arrives on the wire: raw bytes from a multipart upload, or
/// a self-contained `data:` URL from a JSON submission.
#[derive(Debug, Clone)]
pub enum ImagePayload {
    Raw {
        bytes: Vec<u8>,
        filename: Option<String>,
        content_type: Option<String>,
    },
    DataUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Upload to the external image host, store the returned URL.
    Hosted,
    /// Degraded mode: re-embed the validated bytes as a data URL.
    Inline,
}

impl StorageMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hosted" => Some(StorageMode::Hosted),
            "inline" => Some(StorageMode::Inline),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub max_bytes: usize,
    /// Logical folder on the image host.
    pub folder: String,
    pub storage: StorageMode,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            folder: "schoolImages".to_string(),
            storage: StorageMode::Hosted,
        }
    }
}

/// Derive the host-side identifier from the upload time and the original
/// filename: extension stripped, lowercased, anything outside `[a-z0-9_-]`
/// replaced, truncated. Distinct submissions of the same file still get
/// distinct ids through the millisecond stamp.
pub fn public_id(stamp_millis: i128, filename: Option<&str>) -> String {
    let stem = filename
        .map(|f| f.rsplit_once('.').map_or(f, |(stem, _ext)| stem))
        .unwrap_or("upload");
    let mut sanitized: String = stem
        .to_ascii_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(40)
        .collect();
    if sanitized.is_empty() {
        sanitized.push_str("upload");
    }
    format!("school_{stamp_millis}_{sanitized}")
}

pub struct IngestImageUseCase {
    host: Arc<dyn ImageHosting>,
    settings: ImageSettings,
}

impl IngestImageUseCase {
    pub fn new(host: Arc<dyn ImageHosting>, settings: ImageSettings) -> Self {
        Self { host, settings }
    }

    /// Validate the payload and turn it into a storable image reference.
    ///
    /// Checks run in order: the payload must decode, fit the size limit and
    /// carry an accepted format. Only then does anything leave the process.
    #[tracing::instrument(skip(self, payload))]
    pub async fn execute(&self, payload: ImagePayload) -> Result<SchoolImage, ImageIngestionError> {
        let (bytes, declared_mime, filename) = decode_payload(payload)?;

        if bytes.is_empty() {
            return Err(ImageIngestionError::InvalidPayload(
                "image payload is empty".to_string(),
            ));
        }
        if bytes.len() > self.settings.max_bytes {
            return Err(ImageIngestionError::Oversized {
                size: bytes.len(),
                limit_mb: self.settings.max_bytes / (1024 * 1024),
            });
        }

        let format = resolve_format(declared_mime.as_deref(), filename.as_deref())?;

        match self.settings.storage {
            StorageMode::Hosted => {
                let stamp = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
                let upload = ImageUpload {
                    bytes,
                    format,
                    folder: self.settings.folder.clone(),
                    public_id: public_id(stamp, filename.as_deref()),
                };
                let url = self.host.upload(upload).await?;
                tracing::debug!(%url, "image uploaded");
                Ok(SchoolImage::Hosted { url })
            }
            StorageMode::Inline => Ok(SchoolImage::Inline {
                data: format!("data:{};base64,{}", format.mime(), BASE64.encode(&bytes)),
            }),
        }
    }
}

fn decode_payload(
    payload: ImagePayload,
) -> Result<(Vec<u8>, Option<String>, Option<String>), ImageIngestionError> {
    match payload {
        ImagePayload::Raw {
            bytes,
            filename,
            content_type,
        } => Ok((bytes, content_type, filename)),
        ImagePayload::DataUrl(url) => {
            let (mime, bytes) = parse_data_url(&url)?;
            Ok((bytes, Some(mime), None))
        }
    }
}

/// The declared content type wins; the filename extension is only consulted
/// when no content type was sent at all.
fn resolve_format(
    mime: Option<&str>,
    filename: Option<&str>,
) -> Result<ImageFormat, ImageIngestionError> {
    if let Some(mime) = mime {
        return ImageFormat::from_mime(mime).ok_or(ImageIngestionError::UnsupportedFormat);
    }
    filename
        .and_then(|f| f.rsplit_once('.').map(|(_, ext)| ext))
        .and_then(ImageFormat::from_extension)
        .ok_or(ImageIngestionError::UnsupportedFormat)
}

fn parse_data_url(input: &str) -> Result<(String, Vec<u8>), ImageIngestionError> {
    let rest = input.trim().strip_prefix("data:").ok_or_else(|| {
        ImageIngestionError::InvalidPayload("expected a data: URL".to_string())
    })?;
    let (mime, encoded) = rest.split_once(";base64,").ok_or_else(|| {
        ImageIngestionError::InvalidPayload("expected base64-encoded image data".to_string())
    })?;
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| ImageIngestionError::InvalidPayload(format!("invalid base64 data: {e}")))?;
    Ok((mime.to_string(), bytes))
}
