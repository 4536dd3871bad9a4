use axum::{routing::post, Router};

use crate::{handlers::upload, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload::upload_image))
}
