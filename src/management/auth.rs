use crate::{
    Res, config,
    management::CredentialStore,
    types::{ClientCredentials, TokenBundle},
};

/// Owns the result of a successful exchange until it is written out.
pub struct TokenManager {
    credentials: ClientCredentials,
    token: TokenBundle,
}

impl TokenManager {
    pub fn new(credentials: ClientCredentials, token: TokenBundle) -> Self {
        TokenManager { credentials, token }
    }

    /// Writes the client credentials and tokens to `store` and saves it once.
    ///
    /// The expiration is stored as a Unix timestamp in whole seconds.
    pub async fn persist<S: CredentialStore>(&self, store: &mut S) -> Res<()> {
        store.set(config::SPOTIFY_CLIENT_ID, &self.credentials.client_id);
        store.set(config::SPOTIFY_CLIENT_SECRET, &self.credentials.client_secret);
        store.set(config::SPOTIFY_REDIRECT_URI, &self.credentials.redirect_uri);
        store.set(config::SPOTIFY_ACCESS_TOKEN, &self.token.access_token);
        store.set(config::SPOTIFY_REFRESH_TOKEN, &self.token.refresh_token);
        store.set(
            config::SPOTIFY_TOKEN_EXPIRATION,
            &self.token.expires_at.timestamp().to_string(),
        );
        store.save().await
    }

    pub fn current_token(&self) -> &TokenBundle {
        &self.token
    }

    pub fn into_token(self) -> TokenBundle {
        self.token
    }
}
