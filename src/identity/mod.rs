//! Client for the external identity provider.
//!
//! Sign-up, sign-in, OAuth and sessions are owned by the provider; this module
//! only speaks its REST contract and maps the answers to typed values.

mod client;
mod types;

pub use client::{IdentityClient, IdentityError};
pub use types::{IdentityUser, Session, SignUpOutcome, UserMetadata, UserProfile};
