use anyhow::Context;

use stockbot_bot::transport::TelegramTransport;
use stockbot_bot::{BotContext, CommandRouter, Settings, runtime};
use stockbot_infra::{InventoryStore, SqliteInventoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    stockbot_observability::init();

    let settings = Settings::from_env().context("failed to load settings")?;
    tracing::info!(
        admins = settings.admin_ids.len(),
        database = %settings.database_path.display(),
        low_stock_threshold = settings.low_stock_threshold,
        "starting stockbot"
    );

    let store = SqliteInventoryStore::open(&settings.database_path)
        .await
        .with_context(|| format!("failed to open {}", settings.database_path.display()))?;
    if let Err(err) = store.initialize().await {
        store.close().await;
        return Err(err).context("failed to initialize inventory schema");
    }

    let ctx = BotContext::new(store, settings.admin_ids.clone())
        .with_low_stock_threshold(settings.low_stock_threshold);
    let router = CommandRouter::new(ctx);

    let mut transport = TelegramTransport::from_settings(&settings);
    if let Err(err) = transport.skip_pending().await {
        tracing::warn!(error = %format!("{err:#}"), "could not skip pending updates");
    }

    runtime::run(&router, &mut transport, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
    .await;

    Ok(())
}
