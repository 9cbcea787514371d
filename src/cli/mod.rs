//! # CLI Module
//!
//! User-facing layer of spotauth. It wires the terminal prompt, the `.env`
//! credential file and the [`crate::spotify`] flow together and reports
//! progress with the crate's output macros.
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (prompting, progress, status output)
//!     ↓
//! Config Layer (credential resolution, endpoints)
//!     ↓
//! Spotify Layer (authorization URL, code exchange)
//!     ↓
//! Management Layer (persisting tokens to the credential store)
//! ```
//!
//! ## Usage
//!
//! ```bash
//! spotauth                                   # full interactive handshake
//! spotauth --env-file ~/.config/app/.env     # different credential file
//! spotauth --scope user-top-read --scope user-read-private
//! ```

mod auth;

pub use auth::AuthOptions;
pub use auth::auth;
