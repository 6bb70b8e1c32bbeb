use crate::catalog::ProductId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("query is empty")]
    InvalidQuery,

    #[error("unknown product id: {0}")]
    UnknownProduct(ProductId),

    #[error("embedding vector for product {0} has zero norm")]
    DegenerateVector(ProductId),

    #[error("invalid dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("training failed: {0}")]
    Training(String),
}
