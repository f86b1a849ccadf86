use poe_reciper::config::Settings;
use poe_reciper::runner;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Fail before any network activity if identity is missing
    let settings = Settings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let outcomes = runner::run(&settings).await?;
    tracing::info!("Finished {} recipes", outcomes.len());

    Ok(())
}
