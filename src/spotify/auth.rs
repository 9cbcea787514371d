use std::time::Duration;

use chrono::{TimeDelta, Utc};
use reqwest::{Client, StatusCode, header};
use url::Url;

use crate::{
    Res,
    error::AuthError,
    types::{AuthorizationCode, ClientCredentials, TokenBundle, TokenErrorResponse, TokenResponse},
    utils,
};

pub const SPOTIFY_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Upper bound for the token request unless the caller picks another one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authorize and token endpoint of the accounts service.
#[derive(Debug, Clone)]
pub struct Endpoints {
    authorize: Url,
    token: Url,
}

impl Endpoints {
    /// Validates both endpoints as absolute URLs.
    pub fn new(authorize_url: &str, token_url: &str) -> Res<Self> {
        let parse = |raw: &str| {
            Url::parse(raw).map_err(|e| AuthError::Config(format!("endpoint {raw:?}: {e}")))
        };

        Ok(Endpoints {
            authorize: parse(authorize_url)?,
            token: parse(token_url)?,
        })
    }

    pub fn spotify() -> Res<Self> {
        Self::new(SPOTIFY_AUTHORIZE_URL, SPOTIFY_TOKEN_URL)
    }

    pub fn authorize_url(&self) -> &Url {
        &self.authorize
    }

    pub fn token_url(&self) -> &Url {
        &self.token
    }
}

/// The authorization code grant against the Spotify accounts service.
///
/// The flow keeps no state between calls apart from its HTTP client. Every
/// operation is a function of its arguments; only
/// [`exchange_code_for_tokens`](Self::exchange_code_for_tokens) touches the
/// network, and it does so exactly once per call.
///
/// # Example
///
/// ```ignore
/// let flow = AuthorizationFlow::new(Endpoints::spotify()?, DEFAULT_TIMEOUT)?;
/// let url = flow.build_authorization_url(&credentials);
/// // user visits `url`, authorizes, pastes the redirect back
/// let code = extract_authorization_code(&pasted)?;
/// let tokens = flow.exchange_code_for_tokens(&credentials, &code).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AuthorizationFlow {
    client: Client,
    endpoints: Endpoints,
    timeout: Duration,
}

impl AuthorizationFlow {
    /// Creates a flow whose token request gives up after `timeout`.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Res<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(AuthorizationFlow {
            client,
            endpoints,
            timeout,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Builds the URL the user opens to grant access.
    ///
    /// Query parameters are `client_id`, `response_type=code`, `scope` and
    /// `redirect_uri`, form-urlencoded. Parsing the result back yields the
    /// exact `client_id`, `scope` and `redirect_uri` that went in.
    pub fn build_authorization_url(&self, credentials: &ClientCredentials) -> String {
        let mut url = self.endpoints.authorize.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &credentials.client_id)
            .append_pair("response_type", "code")
            .append_pair("scope", &credentials.scope_string())
            .append_pair("redirect_uri", &credentials.redirect_uri);
        url.into()
    }

    /// Exchanges an authorization code for an access and refresh token.
    ///
    /// Sends one form-encoded POST to the token endpoint, authenticated with
    /// the client id and secret as HTTP Basic credentials. The expiry is
    /// anchored at the moment the response headers arrive.
    ///
    /// # Errors
    ///
    /// - [`AuthError::TokenExchange`] for any status other than 200
    /// - [`AuthError::MalformedResponse`] when a 200 body lacks one of
    ///   `access_token`, `refresh_token` or `expires_in`
    /// - [`AuthError::Timeout`] when the request outlives the configured timeout
    /// - [`AuthError::Transport`] for connection failures
    ///
    /// There is no retry: the provider invalidates a code after its first use.
    pub async fn exchange_code_for_tokens(
        &self,
        credentials: &ClientCredentials,
        code: &AuthorizationCode,
    ) -> Res<TokenBundle> {
        let response = self
            .client
            .post(self.endpoints.token.clone())
            .header(
                header::AUTHORIZATION,
                utils::basic_auth_header(&credentials.client_id, &credentials.client_secret),
            )
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code.as_str()),
                ("redirect_uri", credentials.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let received_at = Utc::now();
        let status = response.status();
        let body = response.text().await.map_err(|e| self.request_error(e))?;

        if status != StatusCode::OK {
            return Err(exchange_error(status, &body));
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        let expires_at = i64::try_from(token.expires_in)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| received_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AuthError::MalformedResponse(format!(
                    "expires_in out of range: {}",
                    token.expires_in
                ))
            })?;

        Ok(TokenBundle {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at,
        })
    }

    fn request_error(&self, err: reqwest::Error) -> AuthError {
        if err.is_timeout() {
            AuthError::Timeout(self.timeout)
        } else {
            AuthError::Transport(err.to_string())
        }
    }
}

/// Reads the authorization code out of the URL the browser was redirected to.
///
/// Surrounding whitespace is ignored. A `code` parameter with an empty value
/// counts as missing.
pub fn extract_authorization_code(pasted_url: &str) -> Res<AuthorizationCode> {
    let url = Url::parse(pasted_url.trim()).map_err(|e| AuthError::InvalidUrl(e.to_string()))?;

    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .map(AuthorizationCode::new)
        .ok_or(AuthError::MissingCode)
}

fn exchange_error(status: StatusCode, body: &str) -> AuthError {
    let message = match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(TokenErrorResponse {
            error,
            error_description: Some(description),
        }) => format!(": {error} ({description})"),
        Ok(TokenErrorResponse { error, .. }) => format!(": {error}"),
        Err(_) => String::new(),
    };

    AuthError::TokenExchange {
        status_code: status.as_u16(),
        message,
    }
}
