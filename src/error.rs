//! Error types in ip4t
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error("dataset has no feature columns")]
    ZeroFeatures,
    #[error("at least two classes are required, found {0}")]
    NotEnoughClasses(usize),
    #[error("number of targets ({targets}) does not match number of samples ({samples})")]
    MismatchedShapes { samples: usize, targets: usize },
    #[error("prediction has {predicted} samples but ground truth has {truth}")]
    MismatchedPrediction { predicted: usize, truth: usize },
}
