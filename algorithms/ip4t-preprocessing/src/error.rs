//! Error definitions for preprocessing
use ip4t_nn::NnError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PreprocessingError>;

#[derive(Error, Debug, Clone)]
pub enum PreprocessingError {
    #[error("the training partition is empty")]
    EmptyTrainingSet,
    #[error("encoding produced no feature columns")]
    ZeroFeatures,
    #[error("{what} has {found} rows, expected {expected}")]
    MismatchedRows {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{what} has {found} column names for {expected} columns")]
    MismatchedNames {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("number of neighbours should be at least one, but was {0}")]
    InvalidNeighbourCount(usize),
    #[error("class {class} has {count} samples, oversampling needs at least {required}")]
    InsufficientMinoritySamples {
        class: String,
        count: usize,
        required: usize,
    },
    #[error(transparent)]
    NearestNeighbour(#[from] NnError),
    #[error(transparent)]
    BaseCrate(#[from] ip4t::error::Error),
}
