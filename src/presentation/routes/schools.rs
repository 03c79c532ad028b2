use crate::presentation::handlers::schools;
use axum::{Router, routing::post};

use crate::infrastructure::state::AppState;

/// School routes - create and list, nothing else; records are never updated
/// or deleted through the API.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(schools::create_school).get(schools::list_schools))
}
