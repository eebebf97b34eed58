//! Postgres pools for the server and for tests

use std::time::Duration;

use coursework_core::config::{DatabaseSection, DEFAULT_MAX_CONNECTIONS};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// How long a request waits for a free connection before failing
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

fn options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

/// Connect with the default pool size.
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/fyyur").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    options(DEFAULT_MAX_CONNECTIONS).connect(database_url).await
}

/// Connect using the `[database]` config section.
pub async fn connect(section: &DatabaseSection) -> Result<PgPool, sqlx::Error> {
    let pool = options(section.max_connections)
        .connect(&section.url)
        .await?;
    tracing::debug!(max_connections = section.max_connections, "Database pool ready");
    Ok(pool)
}

/// Pool that only connects on first use. Router tests use it for paths
/// that never reach the database.
pub fn lazy_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    options(1).connect_lazy(database_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Run with: DATABASE_URL=postgres://... cargo test -p coursework-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connects_from_config_section() {
        let section = DatabaseSection {
            url: std::env::var("DATABASE_URL").expect("DATABASE_URL required"),
            max_connections: 2,
        };
        let pool = connect(&section).await.expect("pool creation failed");

        let (one,): (i32,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(one, 1);
    }

    #[tokio::test]
    async fn lazy_pool_does_not_connect() {
        let pool = lazy_pool("postgres://nobody@127.0.0.1:1/none").expect("lazy pool");
        assert_eq!(pool.size(), 0);
    }

    #[test]
    fn zero_connections_is_raised_to_one() {
        assert_eq!(options(0).get_max_connections(), 1);
    }
}
