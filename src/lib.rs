pub mod cli;
pub mod core;
pub mod export;
pub mod providers;
pub mod store;

use crate::core::Session;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{debug, info};

pub enum AppCommand {
    Lookup {
        titles: Vec<String>,
        csv: Option<PathBuf>,
        pdf: Option<PathBuf>,
    },
    Shell,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Bollywood movie lookup starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    }
    .with_env_overrides();
    debug!(
        omdb = %config.providers.omdb.base_url,
        exchange_rate = %config.providers.exchange_rate.base_url,
        recent_limit = config.history.recent_limit,
        "Loaded config"
    );

    let mut session = build_session(&config);

    match command {
        AppCommand::Lookup { titles, csv, pdf } => {
            cli::lookup::run(&mut session, &titles, csv.as_deref(), pdf.as_deref()).await
        }
        AppCommand::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            cli::shell::run(&mut session, stdin).await
        }
    }
}

/// Wires the configured providers into a fresh session.
pub fn build_session(config: &AppConfig) -> Session {
    let omdb = &config.providers.omdb;
    let movie_provider = providers::OmdbProvider::new(&omdb.base_url, omdb.api_key.clone());

    let rates = &config.providers.exchange_rate;
    let rate_provider = providers::CachingCurrencyRateProvider::new(
        providers::ExchangeRateApiProvider::new(&rates.base_url, rates.api_key.clone()),
        Duration::from_secs(rates.cache_ttl_secs),
    );

    Session::new(
        Arc::new(movie_provider),
        Arc::new(rate_provider),
        Arc::new(providers::HttpPosterFetcher::new()),
        config.history.recent_limit,
    )
}
