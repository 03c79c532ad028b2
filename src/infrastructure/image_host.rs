use crate::domain::images::{ImageFormat, ImageHosting, ImageIngestionError, ImageUpload};
use crate::infrastructure::config::ImageHostConfig;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

fn file_extension(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpg",
        ImageFormat::Png => "png",
        ImageFormat::Webp => "webp",
    }
}

/// HTTP client for the external image host. One upload endpoint: multipart
/// POST with the file plus its logical folder and public id; the host
/// answers with the durable URL.
pub struct HttpImageHost {
    client: Client,
    config: ImageHostConfig,
}

impl HttpImageHost {
    pub fn new(config: ImageHostConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self { client, config })
    }

    fn upload_url(&self) -> String {
        format!("{}/image/upload", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

#[async_trait]
impl ImageHosting for HttpImageHost {
    async fn upload(&self, upload: ImageUpload) -> Result<String, ImageIngestionError> {
        let file_name = format!("{}.{}", upload.public_id, file_extension(upload.format));
        let part = Part::bytes(upload.bytes)
            .file_name(file_name)
            .mime_str(upload.format.mime())
            .map_err(|e| ImageIngestionError::Upload(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("folder", upload.folder)
            .text("public_id", upload.public_id);

        let response = self
            .client
            .post(self.upload_url())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ImageIngestionError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageIngestionError::Upload(format!(
                "upload service responded with {status}"
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ImageIngestionError::Upload(e.to_string()))?;

        body.secure_url
            .or(body.url)
            .ok_or_else(|| ImageIngestionError::Upload("upload service returned no URL".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_url_tolerates_a_trailing_slash() {
        let host = HttpImageHost::new(ImageHostConfig {
            base_url: "https://img-api.example.com/v1/".to_string(),
            api_key: "k".to_string(),
        })
        .unwrap();
        assert_eq!(
            host.upload_url(),
            "https://img-api.example.com/v1/image/upload"
        );
    }

    #[test]
    fn extensions_follow_the_format() {
        assert_eq!(file_extension(ImageFormat::Jpeg), "jpg");
        assert_eq!(file_extension(ImageFormat::Png), "png");
        assert_eq!(file_extension(ImageFormat::Webp), "webp");
    }
}
