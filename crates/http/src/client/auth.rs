//! Typed authentication endpoints

use super::{PawsClient, error::ClientError};
use crate::types::{AuthResponse, Credentials, RegisterRequest, UserProfile, VerifyResponse};

impl PawsClient {
    /// Exchange credentials for a session token (public endpoint)
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ClientError> {
        let request = self
            .request(reqwest::Method::POST, "/login")
            .json(credentials);
        self.execute(request).await
    }

    /// Create an account; a successful response is an implicit login
    pub async fn register(&self, payload: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let request = self
            .request(reqwest::Method::POST, "/register")
            .json(payload);
        self.execute(request).await
    }

    /// Fetch a user profile by id (requires an active session token)
    pub async fn fetch_user(&self, user_id: i64) -> Result<UserProfile, ClientError> {
        let request = self.request(reqwest::Method::GET, &format!("/users/{user_id}"));
        self.execute(request).await
    }

    /// Verify a candidate token against the backend.
    ///
    /// The token is attached explicitly rather than through the pipeline, so
    /// a persisted token can be checked before any session state exists.
    pub async fn verify_token(&self, token: &str) -> Result<VerifyResponse, ClientError> {
        let request = self.request_with_bearer(reqwest::Method::GET, "/verify-token", token);
        self.execute(request).await
    }
}
