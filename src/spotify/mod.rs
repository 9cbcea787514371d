//! # Spotify Accounts Module
//!
//! Client side of the OAuth 2.0 authorization code grant against
//! `accounts.spotify.com`.
//!
//! ```text
//! build_authorization_url  ->  user authorizes in the browser
//!          ↓
//! extract_authorization_code (from the pasted redirect URL)
//!          ↓
//! exchange_code_for_tokens  ->  POST /api/token (Basic client auth)
//!          ↓
//! TokenBundle (access token, refresh token, absolute expiry)
//! ```
//!
//! Only the exchange performs I/O, a single request bounded by the
//! flow's timeout. Persisting the result is left to
//! [`crate::management::TokenManager`].

pub mod auth;

pub use auth::{AuthorizationFlow, Endpoints, extract_authorization_code};
