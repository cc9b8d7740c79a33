pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{ApiError, PublishError, Result};

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    response::{IntoResponse, Response},
    BoxError, Router,
};
use services::prompt::PromptTemplate;
use std::{any::Any, sync::Arc, time::Duration};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
    pub prompts: PromptTemplate,
}

impl AppState {
    pub fn new(config: Config) -> std::result::Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(config, http))
    }

    pub fn with_client(config: Config, http: reqwest::Client) -> Self {
        let prompts = PromptTemplate::from_config(&config);
        Self { config, http, prompts }
    }
}

fn build_cors(origins: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    if origins.is_empty() {
        cors.allow_origin(AnyOrigin)
    } else {
        let origins: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!("handler panicked: {}", detail);
    ApiError::Internal(detail).into_response()
}

fn timeout_error(secs: u64, err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("request timed out after {}s", secs);
        ApiError::TimedOut(secs)
    } else {
        ApiError::Internal(err.to_string())
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = build_cors(&state.config.cors_origins);

    // oversized bodies surface as json rejections in the handlers
    let mut app = Router::new()
        .nest("/api", routes::rewrite::routes())
        .nest("/api", routes::publish::routes())
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(CatchPanicLayer::custom(panic_response));

    if let Some(secs) = state.config.request_timeout {
        app = app.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                    timeout_error(secs, err)
                }))
                .layer(TimeoutLayer::new(Duration::from_secs(secs))),
        );
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
