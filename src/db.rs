use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type Conn = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        // Concurrent writers wait on the database lock instead of failing with SQLITE_BUSY.
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub fn create_connection_pool(config: &Config) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);
    r2d2::Pool::builder()
        .max_size(config.pool_size)
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: config.busy_timeout,
        }))
        .build(manager)
        .with_context(|| format!("Failed to create pool for {}", config.database_url))
}

/// Creates the `articles` and `comments` tables if they are missing.
pub fn init_schema(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().context("Failed to get db connection from pool")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!("Failed to run migrations: {}", e))?;
    for version in applied {
        log::info!("applied migration {}", version);
    }
    Ok(())
}
