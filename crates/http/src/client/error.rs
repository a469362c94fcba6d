//! Failures of a single API call
//!
//! The client distinguishes only the outcomes the session layer reacts to:
//! the backend rejected the attached credentials, the record does not exist,
//! the payload was refused, or the call never completed. Everything else is
//! carried as a raw status. Rejections keep the backend's response text so
//! the UI can surface it; the client never retries or reinterprets them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connect failure, timeout,
    /// broken transfer)
    #[error("could not reach backend: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend rejected the attached credentials or token (401/403)
    #[error("rejected by backend: {0}")]
    Rejected(String),

    /// The requested record does not exist (404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Backend refused the request payload (400)
    #[error("request refused: {0}")]
    Invalid(String),

    /// Any other non-success status
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Client was built with unusable settings
    #[error("client misconfigured: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Classify a non-success response
    pub(crate) fn from_response(status: reqwest::StatusCode, message: String) -> Self {
        use reqwest::StatusCode;

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Rejected(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::BAD_REQUEST => Self::Invalid(message),
            _ => Self::Status {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the backend rejected the attached credentials or token, as
    /// opposed to the call failing for unrelated reasons
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn classifies_rejections_by_status() {
        let unauthorized = ClientError::from_response(StatusCode::UNAUTHORIZED, "expired".into());
        assert!(matches!(unauthorized, ClientError::Rejected(_)));
        assert!(unauthorized.is_auth_rejected());

        let forbidden = ClientError::from_response(StatusCode::FORBIDDEN, "nope".into());
        assert!(forbidden.is_auth_rejected());
    }

    #[test]
    fn non_auth_statuses_are_not_auth_rejections() {
        let missing = ClientError::from_response(StatusCode::NOT_FOUND, "no such user".into());
        assert!(matches!(missing, ClientError::NotFound(_)));
        assert!(!missing.is_auth_rejected());

        let refused = ClientError::from_response(StatusCode::BAD_REQUEST, "bad".into());
        assert!(matches!(refused, ClientError::Invalid(_)));

        let teapot = ClientError::from_response(StatusCode::IM_A_TEAPOT, "short and stout".into());
        assert!(matches!(teapot, ClientError::Status { status: 418, .. }));
        assert!(!teapot.is_auth_rejected());
    }
}
