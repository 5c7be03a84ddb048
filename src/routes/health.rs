use axum::{routing::get, Json, Router};

use crate::models::{AppState, RootResponse, ALIVE_MESSAGE};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root))
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ALIVE_MESSAGE.to_string(),
    })
}
