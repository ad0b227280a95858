/// Database migration runner
///
/// Wraps sqlx's migration system. Migration files live in `migrations/` at
/// the workspace root; each has an up file (`{timestamp}_{name}.sql`) and a
/// down file (`{timestamp}_{name}.down.sql`).
///
/// # Example
///
/// ```no_run
/// use seasonplan_shared::db::migrations::run_migrations;
/// use seasonplan_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```
use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Migrations run inside transactions where possible; a failed migration
/// rolls back and surfaces as an error.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("../migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
