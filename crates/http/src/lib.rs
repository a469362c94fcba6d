//! PawsConnect HTTP client
//!
//! Thin typed wrapper over the backend REST API. All outgoing requests pass
//! through a single client so that cross-cutting concerns (bearer credentials,
//! tracing) are applied by an explicit interceptor pipeline rather than by
//! per-call-site wiring.

pub mod client;
pub mod types;

pub use client::{PawsClient, PawsClientBuilder, error::ClientError};
pub use client::interceptor::{BearerAuth, Interceptor, TokenSource};
