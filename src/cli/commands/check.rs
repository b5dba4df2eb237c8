//! Database connectivity probe

use std::time::Duration;

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let db = &config.database;
    let url = db.connection_url()?;
    let timeout = Duration::from_secs(db.connect_timeout_seconds);

    println!("Checking database at {}", db.redacted_url());

    let probe = async {
        let store = Store::with_pool_options(&url, 1, 1, timeout, false).await?;
        store.ping().await
    };

    match tokio::time::timeout(timeout, probe).await {
        Ok(Ok(())) => {
            println!("✓ Database connection OK");
            Ok(())
        }
        Ok(Err(e)) => {
            println!("✗ Database connection failed: {:#}", e);
            Err(e)
        }
        Err(_) => {
            println!(
                "✗ Database connection timed out after {}s",
                db.connect_timeout_seconds
            );
            anyhow::bail!("Database connection timed out")
        }
    }
}
