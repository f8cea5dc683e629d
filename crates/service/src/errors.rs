use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr, TransactionError};
use thiserror::Error;

/// Failure taxonomy of the catalog core. Every variant is distinguishable
/// so the boundary layer can map it to an appropriate status code.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("internal: {0}")]
    Internal(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, name: &str) -> Self {
        Self::NotFound(format!("{entity} {name:?} not found"))
    }

    /// Classify an insert failure: a unique violation on the name index is
    /// an already-exists condition, anything else is surfaced unchanged.
    pub(crate) fn from_insert(entity: &str, name: &str, err: DbErr) -> Self {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            Self::AlreadyExists(format!("{entity} {name:?} already exists"))
        } else {
            err.into()
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => Self::InvalidArgument(msg),
        }
    }
}

impl From<TransactionError<ServiceError>> for ServiceError {
    fn from(err: TransactionError<ServiceError>) -> Self {
        match err {
            TransactionError::Connection(db) => db.into(),
            TransactionError::Transaction(inner) => inner,
        }
    }
}
