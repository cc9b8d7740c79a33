pub mod publish;
pub mod rewrite;
