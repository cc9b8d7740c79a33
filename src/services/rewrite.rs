use crate::{
    config::MissingKeyPolicy,
    error::{ApiError, Result},
    models::{RewriteOutcome, RewriteRequest, FETCH_ONLY_MESSAGE},
    services::{content, gemini::GeminiClient},
    AppState,
};

/// fetch -> extract -> rewrite when a key is present.
pub async fn rewrite_page(state: &AppState, req: &RewriteRequest) -> Result<RewriteOutcome> {
    let raw_url = req.url().ok_or(ApiError::MissingField("URL"))?;

    let api_key = req.api_key();
    if api_key.is_none() && state.config.missing_key_policy == MissingKeyPolicy::Reject {
        return Err(ApiError::MissingField("API key"));
    }

    let url = content::parse_target_url(raw_url)?;
    let html = content::fetch_page(&state.http, url, state.config.fetch_user_agent()).await?;
    let article = content::extract_article(&html);

    let Some(api_key) = api_key else {
        tracing::debug!("no api key, returning extracted text");
        return Ok(RewriteOutcome::FetchOnly {
            title: article.title,
            content: article.body_text,
            message: FETCH_ONLY_MESSAGE.to_string(),
        });
    };

    let prompt = state.prompts.build(&article);
    let rewritten_text = GeminiClient::new(&state.http, &state.config.gemini_api_base)
        .generate(api_key, &prompt)
        .await?;

    Ok(RewriteOutcome::Rewritten {
        rewritten_text,
        title: Some(article.title),
    })
}
