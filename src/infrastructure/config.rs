use crate::application::images::ingest::{ImageSettings, StorageMode};
use anyhow::Context;
use std::env;

/// Credentials and endpoint for the external image host, read once at
/// startup and passed down explicitly. Nothing else in the process reads
/// these variables.
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    pub base_url: String,
    pub api_key: String,
}

impl ImageHostConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            base_url: env::var("IMAGE_HOST_URL").context("IMAGE_HOST_URL must be set")?,
            api_key: env::var("IMAGE_HOST_API_KEY").context("IMAGE_HOST_API_KEY must be set")?,
        })
    }
}

/// Ingestion settings from the environment; every variable has a default.
pub fn image_settings_from_env() -> anyhow::Result<ImageSettings> {
    let defaults = ImageSettings::default();

    let storage = match env::var("IMAGE_STORAGE_MODE") {
        Ok(raw) => StorageMode::parse(&raw)
            .with_context(|| format!("IMAGE_STORAGE_MODE must be 'hosted' or 'inline', got {raw:?}"))?,
        Err(_) => defaults.storage,
    };

    let max_bytes = match env::var("IMAGE_MAX_BYTES") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("IMAGE_MAX_BYTES must be a byte count, got {raw:?}"))?,
        Err(_) => defaults.max_bytes,
    };

    Ok(ImageSettings {
        max_bytes,
        folder: env::var("IMAGE_UPLOAD_FOLDER").unwrap_or(defaults.folder),
        storage,
    })
}
