//! Spotify Authorization Code Handshake
//!
//! This library performs the one-time OAuth 2.0 authorization code grant
//! against the Spotify accounts service and stores the resulting tokens in
//! a `.env` credential file, where other tools pick them up.
//!
//! # Modules
//!
//! - `cli` - Interactive orchestration of the whole handshake
//! - `config` - Credential resolution, endpoint overrides, stored keys
//! - `error` - Error taxonomy and exit codes
//! - `management` - Credential store and the persistence step
//! - `prompt` - User prompt abstraction and its terminal implementation
//! - `spotify` - Authorization URL, code extraction and token exchange
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```ignore
//! use spotauth::{cli, prompt::TerminalPrompt};
//!
//! #[tokio::main]
//! async fn main() -> spotauth::Res<()> {
//!     cli::auth(cli::AuthOptions::default(), &mut TerminalPrompt).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod prompt;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::AuthError;

/// Result alias used throughout the crate.
pub type Res<T> = std::result::Result<T, AuthError>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```ignore
/// info!("Token will expire at: {}", expiry);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark to stderr.
///
/// The caller decides whether and how to exit; see [`AuthError::exit_code`].
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a browser that could not be opened.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
