//! Feed endpoints. Both always answer 200.

use axum::{extract::State, Json};
use tracing::debug;

use metabolab_feed::{DataResponse, InitialResponse};

use crate::state::SharedState;

/// GET /api/data — generate one point and return it with the trailing window.
pub async fn api_data(State(state): State<SharedState>) -> Json<DataResponse> {
    let resp = state.feed.fetch_one().await;
    debug!(sequence = resp.current.sequence, total = resp.total, "served /api/data");
    Json(resp)
}

/// GET /api/initial — full retained history, no generation.
pub async fn api_initial(State(state): State<SharedState>) -> Json<InitialResponse> {
    Json(state.feed.fetch_initial().await)
}
