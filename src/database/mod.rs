pub mod assert;

use anyhow::Context;
use diesel::{
    connection::SimpleConnection,
    r2d2::{ConnectionManager, CustomizeConnection},
    QueryResult, SqliteConnection,
};
use r2d2::PooledConnection;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

const SCHEMA: &str = include_str!("../../migrations/2024-06-01-000000_create_tables/up.sql");

// SQLite keeps these per connection, so every pooled connection needs them.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

#[derive(Debug)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(CONNECTION_PRAGMAS)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn build_pool(database_url: &str, max_size: u32) -> anyhow::Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .context("Failed to create pool")
}

pub fn get_db_conn(pool: &DbPool) -> anyhow::Result<DbConn> {
    pool.get().context("DB connection")
}

/// Creates missing tables. Safe to run on every start.
pub fn run_migrations(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(CONNECTION_PRAGMAS)?;
    conn.batch_execute(SCHEMA)
}
