//! `ip4t` is the modeling core behind the IP4T analysis dashboard.
//!
//! The dashboard loads the IP4T land-tenure program records, describes them and
//! trains a random forest predicting the `POTENSI TOL` (toll-road potential) label.
//! This crate holds the pieces every stage of that pipeline shares:
//!
//! * [`DatasetBase`] with records, targets, sample weights and feature names
//! * the [`Fit`](traits::Fit), [`Predict`](traits::Predict) and
//!   [`Transformer`](traits::Transformer) traits implemented by the algorithm crates
//! * [`ParamGuard`], which checks hyperparameters before a fit is attempted
//! * a seeded, stratified train/test split
//! * the confusion matrix and classification report used for evaluation
//!
//! The algorithms themselves live in the member crates of this workspace:
//! `ip4t-nn` (nearest neighbour search), `ip4t-preprocessing` (one-hot encoding and
//! SMOTE balancing) and `ip4t-trees` (decision trees and the forest).
//!

pub mod dataset;
pub mod error;
mod metrics_classification;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float, Label};
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{
        ClassMetrics, ClassificationReport, ConfusionMatrix, ToConfusionMatrix,
    };
}
