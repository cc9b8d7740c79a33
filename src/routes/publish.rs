use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use crate::{
    error::PublishError,
    models::{PublishRequest, PublishResponse, PUBLISH_SUCCESS_MESSAGE},
    services::wordpress::DraftPublisher,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/wp-migrate",
        post(publish_draft).fallback(|| async { PublishError::MethodNotAllowed }),
    )
}

async fn publish_draft(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> Result<Json<PublishResponse>, PublishError> {
    let Json(req) = payload.map_err(|rejection| PublishError::Connection(rejection.body_text()))?;

    let site_url = req
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or(PublishError::MissingUrl)?;

    let post_url = DraftPublisher::new(&state.http)
        .publish(site_url, &req.username, &req.password, &req.title, &req.content)
        .await?;

    tracing::info!("draft created on {}", site_url);

    Ok(Json(PublishResponse {
        success: true,
        post_url,
        message: PUBLISH_SUCCESS_MESSAGE.to_string(),
    }))
}
