//! In-memory session state and its single writer
//!
//! [`SessionManager`] owns every mutation of the session: login, register,
//! logout, profile refresh, and the startup bootstrap (see
//! [`bootstrap`](crate::bootstrap)). Readers hold a [`SessionHandle`] and
//! observe a consistent snapshot; a reader that started an operation under
//! one snapshot must tolerate the token being cleared before it finishes.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};

use paws_http::types::{Credentials, RegisterRequest, UserProfile};
use paws_http::{BearerAuth, PawsClient, TokenSource};

use crate::config::ClientConfig;
use crate::error::{AuthError, ConfigError, FetchError};
use crate::token_store::TokenStore;
use crate::validation::validate_registration;

/// Current authentication state.
///
/// Invariant: `user` is present only when `token` is; the converse may hold
/// transiently while a persisted token awaits verification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// True iff the in-memory token is non-empty. Pure read, no I/O.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn authenticated(token: String, user: UserProfile) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }
}

/// Cheap cloneable read view of the session.
///
/// Handed to the HTTP interceptor and the route guard; neither can mutate
/// through it.
#[derive(Clone, Default)]
pub struct SessionHandle {
    inner: Arc<ArcSwap<Session>>,
}

impl SessionHandle {
    /// Snapshot of the session as of this call
    pub fn snapshot(&self) -> Arc<Session> {
        self.inner.load_full()
    }

    /// True iff the snapshot token is non-empty
    pub fn is_authenticated(&self) -> bool {
        self.inner.load().is_authenticated()
    }

    pub(crate) fn replace(&self, session: Session) {
        self.inner.store(Arc::new(session));
    }
}

impl TokenSource for SessionHandle {
    fn token(&self) -> Option<String> {
        self.inner.load().token.clone()
    }
}

/// Sole writer of session state.
///
/// Explicitly constructed and passed by reference; there is no process-wide
/// singleton. The manager wires its own [`PawsClient`] with a bearer
/// interceptor reading back through its handle, so authenticated calls always
/// carry the token current at send time.
pub struct SessionManager<S: TokenStore> {
    client: PawsClient,
    store: S,
    handle: SessionHandle,
    bootstrap_deadline: Duration,
}

impl<S: TokenStore> SessionManager<S> {
    /// Build a manager over the given backend configuration and token store
    pub fn new(config: &ClientConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let handle = SessionHandle::default();
        let client = PawsClient::builder()
            .base_url(config.base_url.as_str())
            .timeout(config.request_timeout())
            .interceptor(Arc::new(BearerAuth::new(Arc::new(handle.clone()))))
            .build()?;

        Ok(Self {
            client,
            store,
            handle,
            bootstrap_deadline: config.bootstrap_deadline(),
        })
    }

    /// Read view for guards, interceptors, and UI state
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// The underlying API client (token attachment included)
    pub fn client(&self) -> &PawsClient {
        &self.client
    }

    pub(crate) fn deadline(&self) -> Duration {
        self.bootstrap_deadline
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Exchange credentials for an authenticated session.
    ///
    /// On failure the session is left exactly as it was and the error goes
    /// to the caller; there is no retry.
    pub async fn login(&self, credentials: Credentials) -> Result<Session, AuthError> {
        let response = self.client.login(&credentials).await?;
        self.store.save(&response.token)?;

        let session = Session::authenticated(response.token, response.user);
        self.handle.replace(session.clone());
        info!("login succeeded");
        Ok(session)
    }

    /// Create an account; success behaves as an implicit login.
    ///
    /// The payload is checked against the registration rule set first; rule
    /// violations surface as [`AuthError::Validation`] without any network
    /// call.
    pub async fn register(&self, payload: RegisterRequest) -> Result<Session, AuthError> {
        let issues = validate_registration(&payload);
        if !issues.is_empty() {
            return Err(AuthError::Validation(issues));
        }

        let response = self.client.register(&payload).await?;
        self.store.save(&response.token)?;

        let session = Session::authenticated(response.token, response.user);
        self.handle.replace(session.clone());
        info!("registration succeeded");
        Ok(session)
    }

    /// Clear durable and in-memory session state. Always succeeds, even
    /// when no session existed.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear persisted token");
        }
        self.handle.replace(Session::default());
        info!("session cleared");
    }

    /// Fetch a profile by id, refreshing the in-memory `user` when the
    /// response is well-formed and a session is still active.
    pub async fn fetch_user(&self, user_id: i64) -> Result<UserProfile, FetchError> {
        let profile = match self.client.fetch_user(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(user_id, error = %e, "profile fetch failed; session unchanged");
                return Err(e.into());
            }
        };

        let current = self.handle.snapshot();
        if current.is_authenticated() {
            self.handle.replace(Session {
                token: current.token.clone(),
                user: Some(profile.clone()),
            });
        } else {
            // Token was cleared while the fetch was in flight; keep the
            // user-only-with-token invariant and just return the profile.
            debug!(user_id, "session gone before profile arrived");
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session_is_unauthenticated() {
        assert!(!Session::default().is_authenticated());
    }

    #[test]
    fn blank_token_does_not_authenticate() {
        let session = Session {
            token: Some(String::new()),
            user: None,
        };
        assert!(!session.is_authenticated());
    }

    #[test]
    fn handle_reflects_replacement() {
        let handle = SessionHandle::default();
        assert!(!handle.is_authenticated());
        assert_eq!(handle.token(), None);

        handle.replace(Session {
            token: Some("abc123".into()),
            user: None,
        });
        assert!(handle.is_authenticated());
        assert_eq!(handle.token().as_deref(), Some("abc123"));
    }

    #[test]
    fn clones_of_a_handle_share_state() {
        let handle = SessionHandle::default();
        let reader = handle.clone();

        handle.replace(Session {
            token: Some("t".into()),
            user: None,
        });
        assert!(reader.is_authenticated());
    }
}
