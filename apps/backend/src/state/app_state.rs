use db_infra::config::db::DbKind;
use sea_orm::DatabaseConnection;

/// Shared state handed to every handler through `web::Data`
#[derive(Debug, Clone)]
pub struct AppState {
    /// Connection pool (absent only in tests that exercise the no-db path)
    db: Option<DatabaseConnection>,
    /// Backend the pool talks to
    db_kind: Option<DbKind>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, db_kind: DbKind) -> Self {
        Self {
            db: Some(db),
            db_kind: Some(db_kind),
        }
    }

    pub fn without_db() -> Self {
        Self {
            db: None,
            db_kind: None,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn db_kind(&self) -> Option<DbKind> {
        self.db_kind
    }

    /// Close the pool. Used on graceful shutdown.
    pub async fn close(self) -> Result<(), sea_orm::DbErr> {
        match self.db {
            Some(db) => db.close().await,
            None => Ok(()),
        }
    }
}
