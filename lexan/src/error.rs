use thiserror::Error;

/// Construction-time errors for a [`crate::RegexMatcher`] or [`crate::SkipMatcher`].
#[derive(Debug, Error)]
pub enum LexanError {
    #[error("pattern for {0:?} is empty")]
    EmptyPattern(String),
    #[error("duplicate pattern: {0:?}")]
    DuplicatePattern(String),
    #[error("duplicate handle: {0}")]
    DuplicateHandle(String),
    #[error("regular expression must be anchored with \\A: {0:?}")]
    UnanchoredRegex(String),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}
