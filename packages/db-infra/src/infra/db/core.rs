use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{info, trace, warn};

use crate::config::db::{make_conn_spec, validate_db_config, DbKind, DbOwner, RuntimeEnv};
use crate::error::DbInfraError;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once all retries are exhausted.
pub async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                        attempt, max_attempts, interval_ms
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        DbInfraError::config("no error recorded after max attempts (max_attempts was 0)")
    }))
}

/// Single-connection pool with owner credentials, used for migrations.
pub async fn build_admin_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, DbOwner::Owner)?;

    let mut opt = ConnectOptions::new(&url);
    opt.min_connections(1)
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .sqlx_logging(false);

    // Only Postgres gets retries; SQLite is local
    if matches!(db_kind, DbKind::Postgres) {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt).await.map_err(|e| {
                        DbInfraError::config(format!(
                            "failed to connect to Postgres (admin pool): {e}"
                        ))
                    })
                }
            },
            5,
            500,
        )
        .await
    } else {
        Database::connect(opt).await.map_err(|e| {
            DbInfraError::config(format!("failed to connect to database (admin pool): {e}"))
        })
    }
}

/// Sanitize database URL by masking password in connection strings.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    let Some((scheme, credentials)) = auth_part.split_once("://") else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _password)) => format!("{scheme}://{user}:***@{host_part}"),
        None => url.to_string(),
    }
}

/// True when every defined migration has already been applied.
async fn fast_path_schema_check(conn: &DatabaseConnection) -> Result<bool, DbInfraError> {
    let expected_count = Migrator::migrations().len();
    let expected_last = Migrator::migrations()
        .last()
        .map(|m| m.name().to_string())
        .unwrap_or_default();

    let (current_count, current_last) = match Migrator::get_applied_migrations(conn).await {
        Ok(migrations) => (
            migrations.len(),
            migrations.last().map(|m| m.name().to_string()),
        ),
        Err(DbErr::Exec(_)) => {
            trace!(fastpath = "miss", reason = "migration_table_missing");
            return Ok(false);
        }
        Err(e) => {
            return Err(DbInfraError::migration(format!(
                "failed to get applied migrations: {e}"
            )));
        }
    };

    let is_up_to_date = current_count == expected_count
        && !expected_last.is_empty()
        && current_last.as_deref() == Some(expected_last.as_str());

    let fastpath = if is_up_to_date { "hit" } else { "miss" };
    trace!(
        fastpath,
        current_count,
        expected_count,
        current_last = %current_last.as_deref().unwrap_or(""),
        expected_last = %expected_last
    );

    Ok(is_up_to_date)
}

/// Connect with owner credentials and run `command`.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    validate_db_config(env, db_kind)?;

    let admin_pool = build_admin_pool(env, db_kind).await?;
    let result = orchestrate_migration_internal(&admin_pool, env, db_kind, command).await;

    if let Err(e) = admin_pool.close().await {
        warn!(error = %e, "failed to close admin pool");
    }
    result
}

/// Run `command` on an existing pool. `Up` is skipped when the schema is current.
pub async fn orchestrate_migration_internal(
    pool: &DatabaseConnection,
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    info!(
        "migrate=start env={:?} db_kind={:?} engine={}",
        env,
        db_kind,
        get_db_engine(db_kind)
    );

    if command == MigrationCommand::Up && fast_path_schema_check(pool).await? {
        info!("migrate=skipped up_to_date=true");
        return Ok(());
    }

    migrate(pool, command)
        .await
        .map_err(|e| DbInfraError::migration(format!("migration execution failed: {e}")))?;

    info!("migrate=done");
    Ok(())
}
