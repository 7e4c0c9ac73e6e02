use migration::{Migrator, MigratorTrait};
use settings::Database;

use crate::error::{AppError, Result};

mod error;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "finledger={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    if settings.auth.secret.trim().is_empty() {
        return Err(AppError::Settings("auth.secret must not be empty".to_string()));
    }
    if settings.auth.ttl_hours <= 0 {
        return Err(AppError::Settings("auth.ttl_hours must be > 0".to_string()));
    }

    let db = parse_database(&settings.server.database).await?;
    let engine = engine::Engine::builder()
        .database(db)
        .password_cost(settings.auth.password_cost)
        .build()
        .await?;
    let tokens = server::TokenKeys::new(
        settings.auth.secret.as_bytes(),
        chrono::Duration::hours(settings.auth.ttl_hours),
    );

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    if let Err(err) = server::run_with_listener(engine, tokens, listener).await {
        tracing::error!("server failed: {err}");
        return Err(err.into());
    }

    Ok(())
}

async fn parse_database(config: &settings::Database) -> Result<sea_orm::DatabaseConnection> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    tracing::info!("connecting to {url}");
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
