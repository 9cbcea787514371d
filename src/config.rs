//! Configuration management for the authorization handshake.
//!
//! Everything the flow needs is resolved here, once, before any network
//! traffic happens:
//!
//! 1. Client credentials: taken from the credential store, confirmed or
//!    replaced through the user prompt, then frozen into a
//!    [`ClientCredentials`] value.
//! 2. Endpoints: Spotify's accounts service unless the store or the process
//!    environment overrides them.
//! 3. The location of the `.env` credential file.

use std::path::{Path, PathBuf};

use url::Url;

use crate::{
    Res,
    error::AuthError,
    management::CredentialStore,
    prompt::Prompt,
    spotify::{
        Endpoints,
        auth::{SPOTIFY_AUTHORIZE_URL, SPOTIFY_TOKEN_URL},
    },
    types::ClientCredentials,
    utils,
};

pub const SPOTIFY_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const SPOTIFY_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
pub const SPOTIFY_REDIRECT_URI: &str = "SPOTIFY_REDIRECT_URI";
pub const SPOTIFY_ACCESS_TOKEN: &str = "SPOTIFY_ACCESS_TOKEN";
pub const SPOTIFY_REFRESH_TOKEN: &str = "SPOTIFY_REFRESH_TOKEN";
pub const SPOTIFY_TOKEN_EXPIRATION: &str = "SPOTIFY_TOKEN_EXPIRATION";

pub const SPOTIFY_API_AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const SPOTIFY_API_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";

pub const DEFAULT_SCOPE: &str = "user-read-recently-played";
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Returns the credential file location, expanding a leading `~/`.
///
/// # Example
///
/// ```ignore
/// let path = env_file_path(Path::new("~/.config/spotify/.env"));
/// // e.g. "/home/user/.config/spotify/.env"
/// ```
pub fn env_file_path(path: &Path) -> PathBuf {
    utils::expand_home(path)
}

/// Resolves the accounts service endpoints.
///
/// `SPOTIFY_API_AUTH_URL` and `SPOTIFY_API_TOKEN_URL` replace the default
/// `https://accounts.spotify.com` URLs when present in the store.
///
/// # Errors
///
/// Returns [`AuthError::Config`] if an override is not an absolute URL.
pub fn endpoints<S: CredentialStore>(store: &S) -> Res<Endpoints> {
    let authorize = store
        .get(SPOTIFY_API_AUTH_URL)
        .unwrap_or_else(|| SPOTIFY_AUTHORIZE_URL.to_string());
    let token = store
        .get(SPOTIFY_API_TOKEN_URL)
        .unwrap_or_else(|| SPOTIFY_TOKEN_URL.to_string());

    Endpoints::new(&authorize, &token)
}

/// Resolves the client credentials for this run.
///
/// For each of the client id, client secret and redirect URI:
///
/// - a stored value is kept unless the user answers `y` when asked whether
///   to update it, in which case the new value is read from the prompt
/// - a missing value is read from the prompt
///
/// The stored client secret is never echoed back. Scopes come from the
/// command line; an empty list falls back to [`DEFAULT_SCOPE`].
///
/// # Errors
///
/// - [`AuthError::InvalidCredentials`] for an empty client id or secret, or
///   a redirect URI that is not an absolute URL
/// - [`AuthError::Input`] when the prompt cannot be read
pub fn resolve_credentials<S, P>(
    store: &S,
    prompt: &mut P,
    scopes: Vec<String>,
) -> Res<ClientCredentials>
where
    S: CredentialStore,
    P: Prompt,
{
    let client_id = resolve_value(store, prompt, SPOTIFY_CLIENT_ID, "Spotify Client ID", true)?;
    let client_secret = resolve_value(
        store,
        prompt,
        SPOTIFY_CLIENT_SECRET,
        "Spotify Client Secret",
        false,
    )?;
    let redirect_uri = resolve_value(store, prompt, SPOTIFY_REDIRECT_URI, "Redirect URI", true)?;

    Url::parse(&redirect_uri).map_err(|e| {
        AuthError::InvalidCredentials(format!("redirect URI {redirect_uri:?} is not a URL: {e}"))
    })?;

    let mut scopes: Vec<String> = scopes
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if scopes.is_empty() {
        scopes.push(DEFAULT_SCOPE.to_string());
    }

    Ok(ClientCredentials {
        client_id,
        client_secret,
        redirect_uri,
        scopes,
    })
}

fn resolve_value<S, P>(
    store: &S,
    prompt: &mut P,
    key: &str,
    label: &str,
    reveal: bool,
) -> Res<String>
where
    S: CredentialStore,
    P: Prompt,
{
    let value = match store.get(key) {
        Some(existing) => {
            let question = if reveal {
                format!("Existing {label} found: {existing}. Do you want to update it? (y/n): ")
            } else {
                format!("Existing {label} found. Do you want to update it? (y/n): ")
            };

            if prompt.ask(&question)?.trim().eq_ignore_ascii_case("y") {
                prompt.ask(&format!("Enter your updated {label}: "))?
            } else {
                existing
            }
        }
        None => prompt.ask(&format!("Enter your {label}: "))?,
    };

    let value = value.trim();
    if value.is_empty() {
        return Err(AuthError::InvalidCredentials(format!(
            "{label} must not be empty"
        )));
    }

    Ok(value.to_string())
}
