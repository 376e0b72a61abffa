use thiserror::Error;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{entity} with id = {id} is already {status}")]
    InvalidStateTransition {
        entity: &'static str,
        id: String,
        status: String,
    },

    #[error("{entity} with id = {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] anyhow::Error),
}

impl HrError {
    pub fn validation(message: impl Into<String>) -> Self {
        HrError::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        HrError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for HrError {
    fn from(err: sqlx::Error) -> Self {
        HrError::StorageUnavailable(err.into())
    }
}

impl From<redis::RedisError> for HrError {
    fn from(err: redis::RedisError) -> Self {
        HrError::StorageUnavailable(err.into())
    }
}

impl From<r2d2::Error> for HrError {
    fn from(err: r2d2::Error) -> Self {
        HrError::StorageUnavailable(err.into())
    }
}

pub type HrResult<T> = Result<T, HrError>;
