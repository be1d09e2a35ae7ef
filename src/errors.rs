//!
//! src/errors.rs
//!
//! Defines enums and methods of error conversion
//! for each stage of a resolution
//!
//!

use serde_json::error::Category;
use thiserror::Error;

/// Failure of the single outbound lookup request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {detail}")]
    Transport { detail: String },
    #[error("server error: status {code}")]
    Server { code: u16 },
}

/// Failure to turn a lookup body into a `DecodedResponse`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("resolution cancelled")]
    Cancelled,
    #[error("config error: {0}")]
    Config(String),
}

/// Flat classification used by callers that only branch on the failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TransportError,
    ServerError,
    SyntaxError,
    SchemaMismatch,
    Cancelled,
    Config
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::Fetch(FetchError::Transport { .. }) => ErrorKind::TransportError,
            ResolveError::Fetch(FetchError::Server { .. })    => ErrorKind::ServerError,
            ResolveError::Decode(DecodeError::Syntax(_))      => ErrorKind::SyntaxError,
            ResolveError::Decode(DecodeError::SchemaMismatch(_)) => ErrorKind::SchemaMismatch,
            ResolveError::Cancelled => ErrorKind::Cancelled,
            ResolveError::Config(_) => ErrorKind::Config,
        }
    }

    /// Status code for `ServerError`, None for every other kind
    pub fn status(&self) -> Option<u16> {
        match self {
            ResolveError::Fetch(FetchError::Server { code }) => Some(*code),
            _ => None
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport { detail: e.to_string() }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Data => DecodeError::SchemaMismatch(e.to_string()),
            Category::Syntax | Category::Eof | Category::Io => {
                DecodeError::Syntax(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_split_by_category() {
        let syntax = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(matches!(DecodeError::from(syntax), DecodeError::Syntax(_)));

        let eof = serde_json::from_str::<serde_json::Value>("{\"a\":").unwrap_err();
        assert!(matches!(DecodeError::from(eof), DecodeError::Syntax(_)));

        let data = serde_json::from_str::<Vec<u8>>("{}").unwrap_err();
        assert!(matches!(DecodeError::from(data), DecodeError::SchemaMismatch(_)));
    }

    #[test]
    fn kind_and_status() {
        let e: ResolveError = FetchError::Server { code: 503 }.into();
        assert_eq!(e.kind(), ErrorKind::ServerError);
        assert_eq!(e.status(), Some(503));
        assert_eq!(e.to_string(), "server error: status 503");

        let e: ResolveError = DecodeError::SchemaMismatch("pageUrl".into()).into();
        assert_eq!(e.kind(), ErrorKind::SchemaMismatch);
        assert_eq!(e.status(), None);

        assert_eq!(ResolveError::Cancelled.kind(), ErrorKind::Cancelled);
    }
}
