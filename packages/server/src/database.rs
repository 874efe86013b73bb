use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;

fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // In-memory SQLite lives and dies with its connection, so pooled
    // connections are never reaped or recycled.
    opt.max_connections(config.max_connections.max(1))
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(None)
        .max_lifetime(None)
        .sqlx_logging(false);

    opt
}

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(connect_options(config)).await?;
    db.get_schema_registry("movies_api::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}
