use anyhow::Context;
use axum::http::HeaderValue;
use std::env;
use tower_http::cors::{Any, CorsLayer};

/// CORS policy from `CORS_ALLOWED_ORIGINS` (comma-separated). Unset, empty
/// or `*` opens the API up; the add/show pages are expected to be served
/// from anywhere during development.
pub fn cors_layer() -> anyhow::Result<CorsLayer> {
    match env::var("CORS_ALLOWED_ORIGINS") {
        Err(_) => Ok(permissive()),
        Ok(raw) if raw.trim().is_empty() || raw.trim() == "*" => Ok(permissive()),
        Ok(raw) => {
            let origins = parse_origins(&raw)?;
            Ok(CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any))
        }
    }
}

fn permissive() -> CorsLayer {
    CorsLayer::new().allow_origin(Any)
}

fn parse_origins(raw: &str) -> anyhow::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin {s:?}"))
        })
        .collect()
}
