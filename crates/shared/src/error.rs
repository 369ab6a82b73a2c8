use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Internal,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            400..=499 => ErrorCode::Validation,
            _ => ErrorCode::Internal,
        }
    }
}

/// Error body of the blog service: `{ "error": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Builds an error from a failed response. The body's `error` field wins;
    /// `fallback` (usually the HTTP reason phrase) is used when it is missing.
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<ErrorPayload>(body)
            .map(|payload| payload.error)
            .ok()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Self::new(ErrorCode::from_status(status), message)
    }
}
