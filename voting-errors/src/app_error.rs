use serde::{Deserialize, Serialize};
use std::str::FromStr;

const VALIDATION_PREFIX: &str = "Invalid input: ";
const RATE_LIMITED_PREFIX: &str = "Too many requests, retry in ";
const BACKEND_PREFIX: &str = "Backend request failed: ";
const INTERNAL_PREFIX: &str = "Internal error: ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Sign-in required")]
    AuthRequired,

    /// The voter already has a vote in this poll.
    #[error("Already voted in this poll")]
    Conflict,

    #[error("Poll is closed")]
    PollClosed,

    #[error("Poll not found")]
    NotFound,

    #[error("Too many requests, retry in {0}s")]
    RateLimited(u64),

    #[error("Backend request failed: {0}")]
    Backend(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FromStr for AppError {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Server function errors may arrive wrapped in a longer message.
        let s = match s.find(VALIDATION_PREFIX) {
            Some(at) => &s[at..],
            None => s,
        };

        let parsed = if let Some(msg) = s.strip_prefix(VALIDATION_PREFIX) {
            AppError::Validation(msg.to_string())
        } else if s.contains("Sign-in required") {
            AppError::AuthRequired
        } else if s.contains("Already voted") {
            AppError::Conflict
        } else if s.contains("Poll is closed") {
            AppError::PollClosed
        } else if s.contains("Poll not found") {
            AppError::NotFound
        } else if let Some(rest) = s.find(RATE_LIMITED_PREFIX).map(|at| &s[at + RATE_LIMITED_PREFIX.len()..]) {
            let secs = rest.trim_end_matches('s').parse().unwrap_or(60);
            AppError::RateLimited(secs)
        } else if let Some(at) = s.find(BACKEND_PREFIX) {
            AppError::Backend(s[at + BACKEND_PREFIX.len()..].to_string())
        } else if let Some(at) = s.find(INTERNAL_PREFIX) {
            AppError::Internal(s[at + INTERNAL_PREFIX.len()..].to_string())
        } else {
            AppError::Internal(s.to_string())
        };

        Ok(parsed)
    }
}

impl AppError {
    /// Parses an error string that crossed the server function boundary.
    pub fn from_message(message: &str) -> Self {
        match message.parse() {
            Ok(err) => err,
            Err(never) => match never {},
        }
    }

    /// Locale key of the notice shown for this error.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::Validation(_) => "error.validation",
            Self::AuthRequired => "error.auth.required",
            Self::Conflict => "error.already.voted",
            Self::PollClosed => "error.poll.closed",
            Self::NotFound => "error.not.found",
            Self::RateLimited(_) => "error.rate.limited",
            Self::Backend(_) | Self::Internal(_) => "error.try.later",
        }
    }

    /// Conditions users trigger in normal use; these are not system failures.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::AuthRequired
                | Self::Conflict
                | Self::PollClosed
                | Self::NotFound
                | Self::RateLimited(_)
        )
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        message: String,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = match &self {
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::AuthRequired => StatusCode::UNAUTHORIZED,
                AppError::Conflict => StatusCode::CONFLICT,
                AppError::PollClosed => StatusCode::FORBIDDEN,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::Backend(_) => StatusCode::BAD_GATEWAY,
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(ErrorResponse { message: self.to_string() })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parses_back() {
        let errors = [
            AppError::Validation("title is empty".to_string()),
            AppError::AuthRequired,
            AppError::Conflict,
            AppError::PollClosed,
            AppError::NotFound,
            AppError::RateLimited(42),
            AppError::Backend("connection reset".to_string()),
            AppError::Internal("session store".to_string()),
        ];
        for err in errors {
            assert_eq!(AppError::from_message(&err.to_string()), err);
        }
    }

    #[test]
    fn test_wrapped_message() {
        let wrapped = "error running server function: Already voted in this poll";
        assert_eq!(AppError::from_message(wrapped), AppError::Conflict);
    }

    #[test]
    fn test_unknown_message_is_internal() {
        assert_eq!(
            AppError::from_message("boom"),
            AppError::Internal("boom".to_string())
        );
    }

    #[test]
    fn test_expected_errors() {
        assert!(AppError::Conflict.is_expected());
        assert!(AppError::AuthRequired.is_expected());
        assert!(!AppError::Backend("down".to_string()).is_expected());
        assert_eq!(AppError::Conflict.message_key(), "error.already.voted");
    }
}
