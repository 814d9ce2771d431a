//! IP4T prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::traits::*;

#[doc(no_inline)]
pub use crate::dataset::{
    stratified_split_indices, AsTargets, Dataset, DatasetBase, DatasetView, Float, Label, Labels,
    Records, StratifiedSplit,
};

#[doc(no_inline)]
pub use crate::metrics_classification::{
    ClassMetrics, ClassificationReport, ConfusionMatrix, ToConfusionMatrix,
};

#[doc(no_inline)]
pub use crate::param_guard::ParamGuard;
