pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, FetchOptions};
pub use config::Config;
pub use error::{FetchError, TransportError};
pub use models::{AnimeRecord, Season, ValidationResult};
use state::SharedState;

/// Installs the global tracing subscriber. Logs go to stderr so stdout can
/// carry JSON output.
pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let mut log_level = config.general.log_level.clone();
    if config.general.suppress_connection_errors {
        log_level.push_str(",reqwest=off,hyper_util=off");
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

pub async fn run(args: Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;
    init_logging(&config)?;

    if !matches!(args.command, Commands::Init) {
        match &config.source {
            Some(path) => info!("Loaded config from: {}", path.display()),
            None => info!("No config file found, using defaults"),
        }
    }
    debug!("Using Jikan API at {}", config.jikan.base_url);

    match args.command {
        Commands::Init => {
            let path = args.config.unwrap_or_else(Config::default_config_path);
            cli::cmd_init(&path)
        }

        Commands::FeedUrl { title } => {
            cli::cmd_feed_url(&title.join(" "));
            Ok(())
        }

        Commands::Fetch {
            target,
            json,
            output,
            retitles,
            feed_urls,
        } => {
            let state = SharedState::new(&config)?;
            let options = FetchOptions {
                season: target.season,
                year: target.year,
                json,
                output,
                retitles,
                feed_urls,
            };
            cli::cmd_fetch(&state, options).await
        }

        Commands::Validate { target, input } => {
            let state = SharedState::new(&config)?;
            cli::cmd_validate(
                &state,
                target.season.as_deref(),
                target.year,
                input.as_deref(),
            )
            .await
        }

        Commands::Check { url } => {
            let state = SharedState::new(&config)?;
            cli::cmd_check(&state, &url).await;
            Ok(())
        }
    }
}
