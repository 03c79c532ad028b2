use crate::application::images::ingest::ImageSettings;
use crate::domain::images::ImageHosting;
use crate::infrastructure::db::DbPool;
use axum::extract::FromRef;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub image_host: Arc<dyn ImageHosting>,
    pub image_settings: ImageSettings,
}

impl AppState {
    pub fn new(
        pool: DbPool,
        image_host: Arc<dyn ImageHosting>,
        image_settings: ImageSettings,
    ) -> Self {
        Self {
            pool,
            image_host,
            image_settings,
        }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> DbPool {
        state.pool.clone()
    }
}
