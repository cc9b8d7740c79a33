// wordpress rest api: draft creation
use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::{error::PublishError, models::PUBLISH_FALLBACK_MESSAGE};

#[derive(Debug, Serialize)]
struct DraftPost<'a> {
    title: &'a str,
    content: &'a str,
    status: &'static str,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WpErrorBody {
    message: Option<String>,
}

/// Value of the `Authorization` header for HTTP Basic auth.
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

pub fn posts_endpoint(site_url: &str) -> String {
    format!("{}/wp-json/wp/v2/posts", site_url.trim().trim_end_matches('/'))
}

pub struct DraftPublisher<'a> {
    http: &'a reqwest::Client,
}

impl<'a> DraftPublisher<'a> {
    pub fn new(http: &'a reqwest::Client) -> Self {
        Self { http }
    }

    /// Create a draft post; returns its public link.
    pub async fn publish(
        &self,
        site_url: &str,
        username: &str,
        password: &str,
        title: &str,
        content: &str,
    ) -> Result<Option<String>, PublishError> {
        let response = self
            .http
            .post(posts_endpoint(site_url))
            .header(AUTHORIZATION, basic_auth_header(username, password))
            .json(&DraftPost {
                title,
                content,
                status: "draft",
            })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("wordpress request failed: {}", e);
                PublishError::Connection(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<WpErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| PUBLISH_FALLBACK_MESSAGE.to_string());
            tracing::warn!("wordpress rejected draft ({}): {}", status, message);

            return Err(PublishError::Rejected {
                status: StatusCode::from_u16(status.as_u16())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            });
        }

        let created: CreatedPost = response
            .json()
            .await
            .map_err(|e| PublishError::Connection(e.to_string()))?;

        Ok(created.link)
    }
}
