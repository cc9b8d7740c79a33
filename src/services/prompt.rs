use crate::{config::Config, models::ExtractedArticle};

pub const DEFAULT_LANGUAGE: &str = "Modern Standard Arabic";

pub const DEFAULT_PERSONA: &str =
    "You are an expert {language} editor who rewrites articles professionally and objectively.";

pub const DEFAULT_PROMPT_TEMPLATE: &str = "Rewrite the following article in {language} in a professional way, \
focusing on the key information and clear organization. \
Make sure the output contains no HTML tags, subheadings or code.
This is the article title: \"{title}\".
And this is the extracted content:
---
{content}
---
The output must be the rewritten article only.";

/// Prompt text and system instruction sent to the generative service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewritePrompt {
    pub text: String,
    pub persona: String,
}

/// Builds a fresh [`RewritePrompt`] per request from configured templates.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    persona: String,
    language: String,
    excerpt_chars: usize,
}

impl PromptTemplate {
    pub fn new(template: &str, persona: &str, language: &str, excerpt_chars: usize) -> Self {
        Self {
            template: template.to_string(),
            persona: persona.to_string(),
            language: language.to_string(),
            excerpt_chars,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.rewrite_prompt_template,
            &config.rewrite_persona,
            &config.rewrite_language,
            config.rewrite_excerpt_chars,
        )
    }

    pub fn build(&self, article: &ExtractedArticle) -> RewritePrompt {
        let excerpt = truncate_chars(&article.body_text, self.excerpt_chars);

        let vars = [
            ("language", self.language.as_str()),
            ("title", article.title.as_str()),
            ("content", excerpt),
        ];

        RewritePrompt {
            text: render(&self.template, &vars),
            persona: render(&self.persona, &vars),
        }
    }
}

/// Single-pass `{name}` substitution; substituted values are not rescanned.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let value = tail.find('}').and_then(|end| {
            let name = &tail[1..end];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });

        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_TEMPLATE, DEFAULT_PERSONA, DEFAULT_LANGUAGE, 5000)
    }
}

/// First `max` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
