//! Database configuration and connection pool initialization.
//!
//! The database URL is read from the `DATABASE_URL` environment variable.
//! The pool is created once during startup and carried in the application
//! state; it is cheaply cloneable and shared across request handlers.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails. Startup
/// without a reachable database is not a state the server can run in.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
