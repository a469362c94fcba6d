//! Request interceptor pipeline
//!
//! Interceptors run in registration order on every outgoing request built by
//! [`PawsClient::request`](super::PawsClient::request). Registration is
//! explicit at client construction time; there is no global hook.

use std::fmt;
use std::sync::Arc;

use reqwest::{RequestBuilder, header};

/// A source for the current bearer token.
///
/// Implemented by the session layer so the client always observes the token
/// as it is at send time, including a token cleared while a request from an
/// earlier state is still in flight.
pub trait TokenSource: Send + Sync {
    /// The current token, or `None` when unauthenticated.
    fn token(&self) -> Option<String>;
}

/// A hook applied to every outgoing request.
pub trait Interceptor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Transform the request before it is sent.
    fn intercept(&self, request: RequestBuilder) -> RequestBuilder;
}

impl fmt::Debug for dyn Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interceptor({})", self.name())
    }
}

/// Attaches `Authorization: Bearer <token>` when a token is present.
///
/// Reads the token from its [`TokenSource`] on every request; when the
/// source reports no token the request goes out without the header.
#[derive(Clone)]
pub struct BearerAuth {
    source: Arc<dyn TokenSource>,
}

impl BearerAuth {
    /// Create a bearer interceptor over the given token source.
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self { source }
    }
}

impl Interceptor for BearerAuth {
    fn name(&self) -> &'static str {
        "bearer-auth"
    }

    fn intercept(&self, request: RequestBuilder) -> RequestBuilder {
        match self.source.token() {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }
}
