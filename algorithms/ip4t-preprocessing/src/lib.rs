//! # Preprocessing
//!
//! `ip4t-preprocessing` turns the mixed numeric and categorical columns of the IP4T table into a
//! numeric feature matrix and rebalances the training classes before the forest is fit.
//!
//! * [`OneHotEncoder`](one_hot::OneHotEncoder): one indicator column per category seen in training
//! * [`MedianImputer`](imputer::MedianImputer): fills missing numeric cells with training medians
//! * [`FeatureEncoder`](encoder::FeatureEncoder): both of the above, fit on the training partition
//!   and applied to every partition
//! * [`Smote`](smote::Smote): synthetic minority oversampling until every class matches the
//!   majority class
//!
//! Every encoder is fit on the training partition only. Categories or missing values that appear
//! later never fail a transformation.

pub mod encoder;
pub mod error;
pub mod imputer;
pub mod one_hot;
pub mod smote;

pub use encoder::{EncodedSplit, FeatureEncoder, FeatureFrame, FittedFeatureEncoder};
pub use error::{PreprocessingError, Result};
pub use imputer::{FittedMedianImputer, MedianImputer};
pub use one_hot::{FittedOneHotEncoder, OneHotEncoder};
pub use smote::{Smote, SmoteParams, SmoteValidParams};
