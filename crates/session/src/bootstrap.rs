//! Session bootstrap
//!
//! Runs once at startup, before the UI mounts. Restores the persisted token,
//! verifies it with the backend, and only then marks the session
//! authenticated; a token that fails verification (or the deadline) is
//! discarded from both memory and durable storage, so a second run yields
//! the same empty result.

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::VerificationError;
use crate::session::{Session, SessionManager};
use crate::token_store::TokenStore;

impl<S: TokenStore> SessionManager<S> {
    /// Restore session state from durable storage.
    ///
    /// With no persisted token this completes immediately with an empty
    /// session and issues no network call. On verification failure the
    /// persisted token is cleared and the error is returned; the caller
    /// treats it as "start unauthenticated", never as fatal.
    ///
    /// The session stays unauthenticated until verification completes, so a
    /// navigation guarded during the verification window is redirected
    /// rather than optimistically admitted.
    pub async fn bootstrap(&self) -> Result<Session, VerificationError> {
        let Some(token) = self.store().load()? else {
            debug!("no persisted token; starting unauthenticated");
            return Ok(Session::default());
        };

        match timeout(self.deadline(), self.client().verify_token(&token)).await {
            Ok(Ok(response)) => {
                let session = Session {
                    token: Some(token),
                    user: Some(response.user),
                };
                self.handle().replace(session.clone());
                info!("restored session from persisted token");
                Ok(session)
            }
            Ok(Err(e)) => {
                if e.is_auth_rejected() {
                    info!("persisted token no longer accepted; discarding");
                } else {
                    warn!(error = %e, "token verification failed; discarding");
                }
                self.logout();
                Err(e.into())
            }
            Err(_) => {
                warn!("token verification exceeded bootstrap deadline; discarding");
                self.logout();
                Err(VerificationError::Timeout)
            }
        }
    }
}
