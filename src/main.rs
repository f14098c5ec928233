use std::path::PathBuf;

use anyhow::Result;
use argh::FromArgs;
use thewind::config::API_KEY_ENV;
use thewind::{WindConfig, api::AppState, logging, web};

#[derive(FromArgs)]
/// TheWind weather dashboard server
struct Args {
    /// path to a TOML config file (default: the user config dir)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// port to listen on, overrides the config file
    #[argh(option, short = 'p')]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let config = match args.config {
        Some(path) => WindConfig::load_from_path(Some(path))?,
        None => WindConfig::load()?,
    };
    logging::init(&config.logging)?;

    if config.geocoding.api_key.is_none() {
        tracing::warn!(
            "No geocoding API key set ({}); every city lookup will return no data",
            API_KEY_ENV
        );
    }

    let state = AppState::from_config(&config)?;
    let port = args.port.unwrap_or(config.server.port);
    web::run(state, port).await
}
