use thiserror::Error;

/// Failure reported by a product store.
///
/// Absence is never an error here: reads return `None` and deletes of
/// unknown ids succeed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}
