use serde::{Deserialize, Serialize};

pub const NO_TITLE_PLACEHOLDER: &str = "No Title Found";
pub const REWRITE_FALLBACK_TEXT: &str = "Failed to generate rewritten text.";
pub const GENERATIVE_FAILURE_TEXT: &str = "Gemini API call failed.";
pub const FETCH_ONLY_MESSAGE: &str =
    "Content fetched successfully. No API key was provided, so the text was not rewritten.";
pub const PUBLISH_FALLBACK_MESSAGE: &str = "WordPress Error: Check App Password";
pub const PUBLISH_SUCCESS_MESSAGE: &str = "Draft successfully migrated!";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl RewriteRequest {
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: String,
    pub body_text: String,
}

/// Success payload of the rewrite endpoint; one shape per mode.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RewriteOutcome {
    FetchOnly {
        title: String,
        content: String,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Rewritten {
        rewritten_text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_fields_count_as_missing() {
        let req: RewriteRequest =
            serde_json::from_value(json!({ "url": "", "apiKey": "" })).unwrap();
        assert_eq!(req.url(), None);
        assert_eq!(req.api_key(), None);

        let req: RewriteRequest = serde_json::from_value(json!({ "url": null })).unwrap();
        assert_eq!(req.url(), None);
    }

    #[test]
    fn test_outcome_shapes() {
        let fetched = RewriteOutcome::FetchOnly {
            title: "Example".into(),
            content: "Hello World".into(),
            message: FETCH_ONLY_MESSAGE.into(),
        };
        let value = serde_json::to_value(&fetched).unwrap();
        assert_eq!(value["content"], "Hello World");
        assert!(value.get("rewrittenText").is_none());

        let rewritten = RewriteOutcome::Rewritten {
            rewritten_text: "Bonjour".into(),
            title: None,
        };
        let value = serde_json::to_value(&rewritten).unwrap();
        assert_eq!(value, json!({ "rewrittenText": "Bonjour" }));
    }

    #[test]
    fn test_publish_response_omits_missing_link() {
        let response = PublishResponse {
            success: true,
            post_url: None,
            message: PUBLISH_SUCCESS_MESSAGE.into(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("postUrl").is_none());
        assert_eq!(value["success"], true);
    }
}
