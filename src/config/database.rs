//! Database configuration module.
//!
//! Handles connecting to the storage backend and creating the four tables.
//! Table DDL comes from `SeaORM`'s `Schema::create_table_from_entity`, so the
//! schema always matches the entity definitions in [`crate::entities`]; each
//! statement is issued with `IF NOT EXISTS` so provisioning can be repeated.

use crate::config::runtime::{ConnectionStrategy, RuntimeConfig};
use crate::entities::{Revenue, Site, Ticket, User};
use crate::errors::{Error, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection,
    EntityTrait, Schema,
};
use tracing::{debug, info, instrument};

/// Opens the database described by `config`.
///
/// `Direct` pins the pool to a single connection for the whole run; `Pooled`
/// leaves sizing to the driver.
#[instrument(skip(config), fields(url = %config.redacted_database_url()))]
pub async fn connect(config: &RuntimeConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    if config.connection == ConnectionStrategy::Direct {
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await.map_err(|e| Error::Connection {
        message: e.to_string(),
    })?;
    info!(
        "Connected to {:?} database ({:?})",
        db.get_database_backend(),
        config.connection
    );
    Ok(db)
}

/// Makes server-side UUID generation available where the backend needs it.
///
/// On `PostgreSQL` this installs `uuid-ossp`; other backends rely on the ids
/// the application generates and need nothing.
pub async fn ensure_uuid_support<C>(db: &C, table: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    if db.get_database_backend() == DatabaseBackend::Postgres {
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS \"uuid-ossp\"")
            .await
            .map_err(|e| Error::from(e).for_table(table))?;
    }
    Ok(())
}

/// Creates the table for `entity` unless it already exists.
pub async fn create_table<C, E>(db: &C, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let table = entity.table_name().to_string();
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    debug!("Ensuring table '{}' exists", table);
    db.execute(builder.build(&statement))
        .await
        .map_err(|e| Error::from(e).for_table(&table))?;
    Ok(())
}

/// Creates all four tables in seed order.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    ensure_uuid_support(db, "users").await?;
    create_table(db, User).await?;
    create_table(db, Site).await?;
    create_table(db, Ticket).await?;
    create_table(db, Revenue).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RevenueModel, SiteModel, TicketModel, UserModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<SiteModel> = Site::find().limit(1).all(&db).await?;
        let _: Vec<TicketModel> = Ticket::find().limit(1).all(&db).await?;
        let _: Vec<RevenueModel> = Revenue::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_connect_direct_sqlite() -> Result<()> {
        let config = RuntimeConfig {
            database_url: "sqlite::memory:".to_string(),
            connection: ConnectionStrategy::Direct,
            policy: crate::config::runtime::FailurePolicy::Transactional,
            dataset_path: None,
        };
        let db = connect(&config).await?;
        create_tables(&db).await?;
        db.close().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_connect_failure_is_connection_error() {
        let config = RuntimeConfig {
            database_url: "sqlite://does/not/exist/at/all.sqlite?mode=ro".to_string(),
            connection: ConnectionStrategy::Direct,
            policy: crate::config::runtime::FailurePolicy::Transactional,
            dataset_path: None,
        };
        let result = connect(&config).await;
        assert!(matches!(result, Err(Error::Connection { .. })));
    }
}
