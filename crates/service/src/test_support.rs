#![cfg(test)]
use configs::AppConfig;

use crate::store::CatalogStore;

/// Connect to the test database, or `None` when DB-backed tests should be
/// skipped (no `DATABASE_URL`, unreachable store, or `SKIP_DB_TESTS` set).
pub async fn try_store() -> Option<CatalogStore> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }

    let mut cfg = AppConfig::default();
    cfg.database.normalize_from_env();
    if cfg.database.validate().is_err() {
        eprintln!("skip: DATABASE_URL not configured");
        return None;
    }

    match CatalogStore::connect(&cfg).await {
        Ok(store) => Some(store),
        Err(err) => {
            eprintln!("skip: cannot connect to database: {err}");
            None
        }
    }
}
