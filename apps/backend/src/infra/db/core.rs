use std::str::FromStr;
use std::time::Duration;

use db_infra::config::db::{make_conn_spec, pool_settings, validate_db_config, PoolSettings};
use db_infra::infra::db::{build_admin_pool, orchestrate_migration_internal};
use db_infra::sanitize_db_url;
use migration::MigrationCommand;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, trace, warn};

use super::{DbKind, DbOwner, RuntimeEnv};
use crate::error::AppError;

const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;
const PG_STATEMENT_TIMEOUT: &str = "15s";
const PG_APP_NAME: &str = "employees-api";

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Per-connection session statements, run from the pool's `after_connect` hook.
fn build_session_statements(db_kind: DbKind) -> Vec<String> {
    match db_kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => vec![
            "PRAGMA foreign_keys = ON;".to_string(),
            format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS};"),
        ],
        DbKind::Postgres => vec![
            format!("SET application_name = '{PG_APP_NAME}';"),
            "SET timezone = 'UTC';".to_string(),
            format!("SET statement_timeout = '{PG_STATEMENT_TIMEOUT}';"),
        ],
    }
}

/// Build the application pool *and* make sure the schema is current.
///
/// - SqliteMemory: every connection is its own database, so the single pooled
///   connection is migrated and returned as-is.
/// - Others: migrate through a one-connection admin pool with owner
///   credentials, close it, then open the app pool.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    validate_db_config(env, db_kind)?;

    info!(
        "bootstrap=start env={:?} db_kind={:?} engine={}",
        env,
        db_kind,
        get_db_engine(db_kind)
    );

    let settings = pool_settings(env, db_kind);

    let pool = match db_kind {
        DbKind::SqliteMemory => {
            let pool = build_pool(env, db_kind, &settings).await?;
            orchestrate_migration_internal(&pool, env, db_kind, MigrationCommand::Up).await?;
            pool
        }
        DbKind::SqliteFile | DbKind::Postgres => {
            let admin_pool = build_admin_pool(env, db_kind).await?;
            let migrated =
                orchestrate_migration_internal(&admin_pool, env, db_kind, MigrationCommand::Up)
                    .await;
            if let Err(e) = admin_pool.close().await {
                warn!(error = %e, "failed to close admin pool");
            }
            migrated?;
            build_pool(env, db_kind, &settings).await?
        }
    };

    info!("bootstrap=ready");
    Ok(pool)
}

/// Open the application pool with app-owner credentials.
pub async fn build_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
    settings: &PoolSettings,
) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, db_kind, DbOwner::App)?;
    let statements = build_session_statements(db_kind);

    match db_kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
                .create_if_missing(true);

            let mut options = SqlitePoolOptions::new()
                .min_connections(settings.pool_min)
                .max_connections(settings.pool_max)
                .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms));

            // A recycled in-memory connection would come back as an empty database
            if db_kind == DbKind::SqliteMemory {
                options = options.idle_timeout(None).max_lifetime(None);
            }

            let pool: SqlitePool = options
                .after_connect(move |conn, _meta| {
                    let statements = statements.clone();
                    Box::pin(async move {
                        for stmt in &statements {
                            sqlx::query(stmt).execute(&mut *conn).await?;
                        }
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| {
                    AppError::config(format!("failed to create SQLite connection pool: {e}"))
                })?;

            info!(
                "pool=create engine=sqlite path={} min={} max={} acquire_timeout_ms={}",
                url, settings.pool_min, settings.pool_max, settings.acquire_timeout_ms
            );
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }

        DbKind::Postgres => {
            let sqlx_pool = PgPoolOptions::new()
                .min_connections(settings.pool_min)
                .max_connections(settings.pool_max)
                .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
                .idle_timeout(Duration::from_secs(30))
                .after_connect(move |conn, _meta| {
                    let statements = statements.clone();
                    Box::pin(async move {
                        for stmt in &statements {
                            sqlx::query(stmt).execute(&mut *conn).await?;
                        }
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect(&url)
                .await
                .map_err(|e| AppError::config(format!("failed to connect to Postgres: {e}")))?;

            info!(
                "pool=create engine=postgres url={} min={} max={} acquire_timeout_ms={}",
                sanitize_db_url(&url),
                settings.pool_min,
                settings.pool_max,
                settings.acquire_timeout_ms
            );
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(sqlx_pool))
        }
    }
}
