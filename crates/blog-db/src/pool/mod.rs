//! Database connection pool management

mod postgres;

pub use postgres::{create_pool, run_migrations, MIGRATIONS_DIR};

pub use sqlx::postgres::PgPool;
