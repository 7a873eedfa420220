use reqwest::StatusCode;
use shared_utils::env::MissingEnvVarError;
use thiserror::Error;

use crate::{providers::ProviderError, response::ParseError};

/// The unified error type for the `news_feed` crate.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A required credential is not configured.
    #[error("{name} not configured. Add it to the environment of the news proxy.")]
    Config { name: String },

    /// The backend could not be reached or answered with an error.
    #[error(transparent)]
    Transport(#[from] ProviderError),

    /// The backend answered with output that is not usable.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Required caller input is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The proxy only accepts POST.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl From<MissingEnvVarError> for FeedError {
    fn from(err: MissingEnvVarError) -> Self {
        FeedError::Config { name: err.0 }
    }
}

impl FeedError {
    /// HTTP status used when this error is reported by the news proxy.
    pub fn status(&self) -> StatusCode {
        match self {
            FeedError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            FeedError::Transport(ProviderError::Api { status, .. }) => *status,
            FeedError::Transport(_) | FeedError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FeedError::Validation(_) => StatusCode::BAD_REQUEST,
            FeedError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Message placed in the `error` field of a proxy response. Upstream
    /// error bodies are passed through untouched.
    pub fn client_message(&self) -> String {
        match self {
            FeedError::Transport(ProviderError::Api { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        let config: FeedError = MissingEnvVarError("ANTHROPIC_API_KEY".into()).into();
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            config.to_string(),
            "ANTHROPIC_API_KEY not configured. Add it to the environment of the news proxy."
        );

        assert_eq!(FeedError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(FeedError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);

        let upstream = FeedError::from(ProviderError::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "{\"type\":\"rate_limit_error\"}".into(),
        });
        assert_eq!(upstream.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(upstream.client_message(), "{\"type\":\"rate_limit_error\"}");
    }
}
