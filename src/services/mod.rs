pub mod content;
pub mod gemini;
pub mod prompt;
pub mod rewrite;
pub mod wordpress;
