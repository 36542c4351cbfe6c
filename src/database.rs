//! PostgreSQL connection pool.
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

/// Init database connections.
pub async fn connect(url: &str, pool: u32) -> Result<PgPool, sqlx::Error> {
    let options: PgConnectOptions = url.parse()?;
    let (host, port) = (options.get_host().to_owned(), options.get_port());
    let database = options.get_database().unwrap_or_default().to_owned();

    let postgres = PgPoolOptions::new()
        .max_connections(pool)
        .connect_with(options)
        .await?;

    tracing::info!(%host, port, %database, pool, "postgres connected");

    Ok(postgres)
}
