//! Error taxonomy for the authorization flow.
//!
//! Every failure is terminal for the current run. The CLI reports the
//! message and exits with [`AuthError::exit_code`].

use std::time::Duration;

/// Errors raised while resolving credentials, talking to the accounts
/// service, or persisting the result.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The pasted redirect is not an absolute URL.
    #[error("pasted text is not a valid URL: {0}")]
    InvalidUrl(String),

    /// The redirect URL has no (or an empty) `code` query parameter.
    #[error("redirect URL does not contain an authorization code")]
    MissingCode,

    /// The token endpoint answered with something other than 200.
    #[error("token exchange failed with status {status_code}{message}")]
    TokenExchange { status_code: u16, message: String },

    /// A 200 response without the expected token fields.
    #[error("token endpoint returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("token request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Connection level failure before any status was received.
    #[error("token request failed: {0}")]
    Transport(String),

    #[error("credential store error: {0}")]
    Store(String),

    #[error("failed to read input: {0}")]
    Input(String),

    #[error("invalid client credentials: {0}")]
    InvalidCredentials(String),

    /// Endpoint override or HTTP client setup is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AuthError {
    /// Process exit code for this failure. Zero is reserved for success.
    pub fn exit_code(&self) -> i32 {
        match self {
            AuthError::InvalidUrl(_) => 2,
            AuthError::MissingCode => 3,
            AuthError::TokenExchange { .. } => 4,
            AuthError::MalformedResponse(_) => 5,
            AuthError::Timeout(_) => 6,
            AuthError::Transport(_) => 7,
            AuthError::Store(_) => 8,
            AuthError::Input(_) => 9,
            AuthError::InvalidCredentials(_) => 10,
            AuthError::Config(_) => 11,
        }
    }

    /// Short name of the step that failed, used as a prefix in CLI output.
    pub fn step(&self) -> &'static str {
        match self {
            AuthError::InvalidUrl(_) | AuthError::MissingCode => "reading authorization code",
            AuthError::TokenExchange { .. }
            | AuthError::MalformedResponse(_)
            | AuthError::Timeout(_)
            | AuthError::Transport(_) => "exchanging code for tokens",
            AuthError::Store(_) => "accessing credential store",
            AuthError::Config(_) => "loading configuration",
            AuthError::Input(_) | AuthError::InvalidCredentials(_) => "collecting client credentials",
        }
    }
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Store(err.to_string())
    }
}
