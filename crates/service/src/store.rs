use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tracing::info;

/// Durations (fixed-point milliseconds) applied to treatments created
/// without explicit time requirements.
#[derive(Clone, Copy, Debug)]
pub struct TreatmentDefaults {
    pub initial_time_requirement_ms: i64,
    pub additional_time_requirement_ms: i64,
}

/// Handle to the catalog collections. Constructed once at startup and
/// passed explicitly to the boundary layer; there is no global instance.
#[derive(Clone)]
pub struct CatalogStore {
    pub(crate) db: DatabaseConnection,
    pub(crate) defaults: TreatmentDefaults,
}

impl CatalogStore {
    /// Connect to the backing store, verify liveness and bring the schema
    /// (tables and all indexes) up to date. The migrator is idempotent and
    /// safe to run on every startup. Errors here are fatal.
    pub async fn connect(cfg: &AppConfig) -> anyhow::Result<Self> {
        let db = models::db::connect(&cfg.database).await?;
        migration::Migrator::up(&db, None).await?;
        info!("catalog schema up to date");

        Ok(Self::new(
            db,
            TreatmentDefaults {
                initial_time_requirement_ms: cfg.treatments.default_initial_time_requirement_ms,
                additional_time_requirement_ms: cfg.treatments.default_additional_time_requirement_ms,
            },
        ))
    }

    pub fn new(db: DatabaseConnection, defaults: TreatmentDefaults) -> Self {
        Self { db, defaults }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
