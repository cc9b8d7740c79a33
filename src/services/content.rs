use reqwest::header::USER_AGENT;
use scraper::{ElementRef, Html, Node, Selector};

use crate::{
    error::{ApiError, Result},
    models::{ExtractedArticle, NO_TITLE_PLACEHOLDER},
};

/// Parse the target url. An unusable url fails the same way an
/// unreachable one does.
pub fn parse_target_url(raw: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| ApiError::UpstreamUnreachable(format!("invalid URL '{}': {}", raw, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::UpstreamUnreachable(format!(
            "unsupported URL scheme '{}'",
            parsed.scheme()
        )));
    }

    Ok(parsed)
}

/// Fetch the raw markup of a page. One attempt, no timeout of its own.
pub async fn fetch_page(
    http: &reqwest::Client,
    url: url::Url,
    user_agent: Option<&str>,
) -> Result<String> {
    let mut request = http.get(url);
    if let Some(ua) = user_agent {
        request = request.header(USER_AGENT, ua);
    }

    let response = request.send().await.map_err(|e| {
        let reason = error_chain(&e);
        tracing::warn!("page fetch failed: {}", reason);
        ApiError::UpstreamUnreachable(reason)
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("page fetch rejected with status {}", status);
        return Err(ApiError::UpstreamRejected(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| ApiError::UpstreamUnreachable(e.to_string()))
}

// transport errors hide the resolver or socket cause in their sources
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !reason.contains(&text) {
            reason.push_str(": ");
            reason.push_str(&text);
        }
        source = cause.source();
    }
    reason
}

/// Title and whitespace-normalized visible body text of a document.
/// Malformed markup yields partial or empty text, never an error.
pub fn extract_article(html: &str) -> ExtractedArticle {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title")
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE_PLACEHOLDER.to_string());

    let mut raw = String::new();
    if let Some(body) = first_element(&document, "body") {
        collect_visible_text(&body, &mut raw);
    }

    ExtractedArticle {
        title,
        body_text: normalize_whitespace(&raw),
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
/// U+FEFF counts as whitespace here.
pub fn normalize_whitespace(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{feff}')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_element<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    first_element(document, selector).map(|el| el.text().collect::<String>())
}

fn collect_visible_text(element: &ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(elem) => {
                // not rendered
                if matches!(elem.name(), "script" | "style" | "noscript" | "template") {
                    continue;
                }
                if let Some(child_elem) = ElementRef::wrap(child) {
                    collect_visible_text(&child_elem, out);
                }
            }
            _ => {}
        }
    }
}
