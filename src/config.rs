use clap::{Parser, ValueEnum};

use crate::services::prompt::{DEFAULT_LANGUAGE, DEFAULT_PERSONA, DEFAULT_PROMPT_TEMPLATE};

pub const DEFAULT_GEMINI_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-05-20:generateContent?key=";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// What the rewrite endpoint does when the caller sends no api key.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Return the extracted page text without calling the generative service.
    FetchOnly,
    /// Reject the request with 400.
    Reject,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "redraft")]
#[command(about = "Page rewrite and draft publishing proxy", long_about = None)]
pub struct Config {
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "SERVER_PORT", default_value = "8080")]
    pub port: u16,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    // unset: requests run until the upstream calls finish
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout: Option<u64>,

    #[arg(long, env = "MAX_BODY_BYTES", default_value = "1048576")]
    pub max_body_bytes: usize,

    #[arg(long, env = "CORS_ORIGINS", default_value = "")]
    pub cors_origins: String,

    // generative text service; the caller's key is appended
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_GEMINI_API_BASE)]
    pub gemini_api_base: String,

    #[arg(long, env = "MISSING_KEY_POLICY", value_enum, default_value = "fetch-only")]
    pub missing_key_policy: MissingKeyPolicy,

    // outbound page fetch
    #[arg(long, env = "FETCH_BROWSER_UA", default_value_t = true, action = clap::ArgAction::Set)]
    pub browser_user_agent: bool,

    #[arg(long, env = "FETCH_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    // rewrite prompt
    #[arg(long, env = "REWRITE_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub rewrite_language: String,

    #[arg(long, env = "REWRITE_PERSONA", default_value = DEFAULT_PERSONA)]
    pub rewrite_persona: String,

    #[arg(long, env = "REWRITE_PROMPT_TEMPLATE", default_value = DEFAULT_PROMPT_TEMPLATE)]
    pub rewrite_prompt_template: String,

    #[arg(long, env = "REWRITE_EXCERPT_CHARS", default_value = "5000")]
    pub rewrite_excerpt_chars: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    /// User agent to send with page fetches, if enabled.
    pub fn fetch_user_agent(&self) -> Option<&str> {
        self.browser_user_agent.then_some(self.user_agent.as_str())
    }
}
