//! Session error taxonomy
//!
//! Three kinds, matching how each failure is handled: `AuthError` is
//! surfaced to the caller with the session unchanged, `FetchError` is
//! reported but never fatal, and `VerificationError` forces the session and
//! durable token to be cleared. Nothing is retried automatically and nothing
//! terminates the process; every failure degrades to unauthenticated.

use thiserror::Error;

use paws_http::ClientError;

use crate::token_store::StoreError;
use crate::validation::ValidationIssue;

/// Login or registration failure. The session is left unchanged.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration data violated the client-side rule set; no network
    /// call was made.
    #[error("validation failed: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// Backend rejected the credentials or the call failed in transit
    #[error(transparent)]
    Api(#[from] ClientError),

    /// Token could not be persisted after a successful exchange
    #[error("failed to persist session token: {0}")]
    Store(#[from] StoreError),
}

/// Profile retrieval failure. The session is left unchanged.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Api(#[from] ClientError),
}

/// Bootstrap verification failure. Session and durable token are cleared.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// Backend rejected the persisted token or the call failed in transit
    #[error(transparent)]
    Api(#[from] ClientError),

    /// Verification did not complete within the bootstrap deadline
    #[error("token verification timed out")]
    Timeout,

    /// Durable storage could not be read
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Invalid client configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Message(String),

    /// Building the underlying HTTP client failed
    #[error(transparent)]
    Client(#[from] ClientError),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
