use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::drugs, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        // Exact-name lookup over a set of candidate words
        .route("/check-drugs", post(drugs::check_drugs))

        // Pairwise interaction check
        .route("/check-interaction", post(drugs::check_interaction))

        // Full drug records
        .route("/api/drugs", get(drugs::list_drugs))
        .route("/api/drugs/:name", get(drugs::get_drug))
}
