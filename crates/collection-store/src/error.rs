use thiserror::Error;

use crate::validation::Violation;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("payload failed validation")]
    Validation(Vec<Violation>),

    #[error("record {id} not found in {collection}")]
    NotFound { collection: String, id: String },

    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
