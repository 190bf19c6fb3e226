//! Authenticated access to the Jampp reporting GraphQL API
//!
//! [`ReportingClient`] executes GraphQL operations against the reporting
//! endpoint, obtaining bearer tokens through the client-credentials grant.
//! Tokens are cached by [`auth::TokenCache`] until shortly before they expire.

pub mod auth;
pub mod client;
pub mod clock;
mod error;

pub use client::{QueryRequest, ReportingClient, ReportingConfig};
pub use error::Error;
pub use secrecy::SecretString;
