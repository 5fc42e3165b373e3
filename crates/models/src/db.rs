use std::time::Duration;

use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub static DATABASE_URL: Lazy<Option<String>> = Lazy::new(|| {
    // Load .env if present
    let _ = dotenvy::dotenv();
    std::env::var("DATABASE_URL").ok()
});

/// Connect using `DATABASE_URL`; errors when the variable is unset.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let url = DATABASE_URL
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL not set"))?;
    let db = Database::connect(url).await?;
    Ok(db)
}

/// Connect with explicit pool settings, as supplied by the configs crate.
pub async fn connect_with_url(
    url: &str,
    max_connections: u32,
    connect_timeout_secs: u64,
    sqlx_logging: bool,
) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.max_connections(max_connections)
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .sqlx_logging(sqlx_logging);
    let db = Database::connect(opts).await?;
    Ok(db)
}
