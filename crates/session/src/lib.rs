//! PawsConnect client session lifecycle
//!
//! Everything here revolves around one piece of shared state: the current
//! [`Session`]. The [`SessionManager`] is its sole writer; the HTTP layer and
//! the route guard only read it through a [`SessionHandle`] snapshot. Durable
//! persistence is limited to the bearer token, mirrored through a
//! [`TokenStore`].

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod guard;
pub mod session;
pub mod token_store;
pub mod validation;

pub use config::ClientConfig;
pub use error::{AuthError, FetchError, VerificationError};
pub use guard::{GuardDecision, Route, RouteGuard};
pub use session::{Session, SessionHandle, SessionManager};
pub use token_store::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};
pub use validation::{ValidationIssue, validate_registration};
