use anyhow::Result;
use clap::Parser;
use sherwoodctl::cli::{self, Cli};
use sherwoodctl::config::{ConfigSource, SherwoodConfig};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let (config, source) = match &cli.config {
        Some(path) => (
            SherwoodConfig::load_from_file(path)?,
            ConfigSource::File(path.clone()),
        ),
        None => SherwoodConfig::load_from_env()?,
    };
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    debug!(?source, "configuration loaded");

    let runtime = cli::build_runtime(&config)?;
    let output = cli::execute(cli.command, &runtime).await?;
    println!("{output}");
    Ok(())
}
