use broadcaster::utils::{logger, validation::Validate};
use broadcaster::BroadcasterConfig;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BroadcasterConfig::parse();

    logger::init_logger(config.verbose, config.log_format);

    tracing::info!("Starting broadcaster");
    if config.verbose {
        tracing::debug!("Config: {}", serde_json::to_string(&config)?);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = broadcaster::server::run(&config).await {
        tracing::error!("{}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(if e.is_config_error() { 1 } else { 2 });
    }

    Ok(())
}
