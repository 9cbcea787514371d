use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Res, config, info,
    management::{EnvFileStore, TokenManager},
    prompt::Prompt,
    spotify::{
        AuthorizationFlow,
        auth::{DEFAULT_TIMEOUT, extract_authorization_code},
    },
    success,
    types::TokenBundle,
    utils, warning,
};

/// Settings for one run of the handshake.
#[derive(Debug, Clone)]
pub struct AuthOptions {
    pub env_file: PathBuf,
    pub scopes: Vec<String>,
    pub timeout: Duration,
    pub open_browser: bool,
}

impl Default for AuthOptions {
    fn default() -> Self {
        AuthOptions {
            env_file: PathBuf::from(config::DEFAULT_ENV_FILE),
            scopes: vec![config::DEFAULT_SCOPE.to_string()],
            timeout: DEFAULT_TIMEOUT,
            open_browser: true,
        }
    }
}

/// Runs the complete authorization code handshake.
///
/// 1. **Configuration**: loads the credential file and resolves the client
///    credentials, asking the user to confirm or replace stored values
/// 2. **Authorization**: prints the authorization URL and, if enabled,
///    opens it in the default browser
/// 3. **Code capture**: asks the user to paste the URL the browser was
///    redirected to and extracts the `code` parameter
/// 4. **Token exchange**: trades the code for tokens in a single request
/// 5. **Persistence**: writes credentials and tokens back to the file
///
/// Returns `Ok(None)` when the user pastes nothing, which ends the run
/// without touching the credential file.
pub async fn auth<P: Prompt>(options: AuthOptions, prompt: &mut P) -> Res<Option<TokenBundle>> {
    let mut store = EnvFileStore::open(config::env_file_path(&options.env_file)).await?;
    let credentials = config::resolve_credentials(&store, prompt, options.scopes)?;
    let flow = AuthorizationFlow::new(config::endpoints(&store)?, options.timeout)?;

    let auth_url = flow.build_authorization_url(&credentials);
    info!(
        "Please log in to Spotify and authorize the app by visiting the following URL:\n{}",
        auth_url
    );

    if options.open_browser && webbrowser::open(&auth_url).is_err() {
        warning!("Failed to open browser. Please navigate to the URL above manually.");
    }

    let pasted = prompt.ask("Paste the entire URL from your browser's address bar: ")?;
    if pasted.trim().is_empty() {
        warning!("No URL provided, nothing was saved.");
        return Ok(None);
    }

    let code = extract_authorization_code(&pasted)?;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Exchanging authorization code for tokens...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let exchanged = flow.exchange_code_for_tokens(&credentials, &code).await;
    pb.finish_and_clear();

    let token_manager = TokenManager::new(credentials, exchanged?);
    token_manager.persist(&mut store).await?;

    success!(
        "Access and refresh tokens generated and saved to {}",
        store.path().display()
    );
    info!(
        "Token will expire at: {}",
        utils::format_expiration(&token_manager.current_token().expires_at)
    );

    Ok(Some(token_manager.into_token()))
}
