use std::{path::PathBuf, time::Duration};

use clap::{
    ArgAction, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use spotauth::{
    cli::{self, AuthOptions},
    config, error,
    prompt::TerminalPrompt,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Credential file to read from and write tokens to
    #[clap(long, env = "SPOTAUTH_ENV_FILE", default_value = config::DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Scope to request; can be repeated or comma separated
    #[clap(
        long = "scope",
        default_value = config::DEFAULT_SCOPE,
        action = ArgAction::Append,
        value_delimiter = ','
    )]
    scopes: Vec<String>,

    /// Seconds to wait for the token endpoint
    #[clap(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Only print the authorization URL instead of opening a browser
    #[clap(long)]
    no_browser: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let options = AuthOptions {
        env_file: cli.env_file,
        scopes: cli.scopes,
        timeout: Duration::from_secs(cli.timeout),
        open_browser: !cli.no_browser,
    };

    if let Err(e) = cli::auth(options, &mut TerminalPrompt).await {
        error!("Failed while {}: {}", e.step(), e);
        std::process::exit(e.exit_code());
    }
}
