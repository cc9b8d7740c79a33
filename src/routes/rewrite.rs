use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use crate::{
    error::{ApiError, Result},
    models::{RewriteOutcome, RewriteRequest},
    services::rewrite::rewrite_page,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/rewrite",
        post(rewrite).fallback(|| async { ApiError::MethodNotAllowed }),
    )
}

async fn rewrite(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RewriteRequest>, JsonRejection>,
) -> Result<Json<RewriteOutcome>> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("unreadable rewrite request: {}", rejection.body_text());
        ApiError::Internal(rejection.body_text())
    })?;

    let outcome = rewrite_page(&state, &req).await?;
    Ok(Json(outcome))
}
