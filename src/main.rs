use anyhow::Context;
use airbnb_listings::{AppConfig, with_session};

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        log::error!("{err:#}");
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    log::debug!("Loaded {config:?}");

    let operation = config.operation;
    with_session(&config, async |session| {
        let mut stdout = std::io::stdout().lock();
        operation.run(session, &mut stdout).await
    })
    .await
    .with_context(|| format!("{operation} failed"))
}
