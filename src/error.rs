use thiserror::Error;

/// Rejections raised before an article is handed to the analyzer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArticleError {
    #[error("article title is empty")]
    EmptyTitle,

    #[error("article content is empty")]
    EmptyContent,

    #[error("invalid article date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown bias category: {0}")]
pub struct UnknownCategory(pub String);
