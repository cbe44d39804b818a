//! Shared `PostgreSQL` plumbing for the Diesel adapters.
//!
//! Diesel is synchronous, so every adapter call is offloaded to Tokio's
//! blocking pool. Connections come from a shared r2d2 pool built from
//! [`DatabaseConfig`].

use crate::config::DatabaseConfig;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};

/// `PostgreSQL` connection pool type shared by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type for adapter internals.
pub(crate) type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Builds a connection pool from configuration.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(config: &DatabaseConfig) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.connection_url());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .build(manager)?;
    tracing::info!(
        host = %config.host,
        database = %config.name,
        max_connections = config.max_connections,
        "postgres pool ready"
    );
    Ok(pool)
}

/// Runs a blocking task and maps join errors into the caller's error type.
pub(crate) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool with a caller-provided error mapper.
pub(crate) fn get_conn_with<E, M>(pool: &PgPool, map_err: M) -> Result<PooledConn, E>
where
    M: FnOnce(PoolError) -> E,
{
    pool.get().map_err(map_err)
}
