//! Apply migrations without starting the server

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let url = config.database.connection_url()?;
    let store = Store::with_pool_options(
        &url,
        1,
        1,
        std::time::Duration::from_secs(config.database.connect_timeout_seconds),
        false,
    )
    .await?;

    store.migrate().await?;
    println!("✓ Migrations applied");

    Ok(())
}
