//! Datasets
//!
//! This module implements the dataset struct and various helper traits to extend its
//! functionality.
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Ix2, ScalarOperand};

use num_traits::{FromPrimitive, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

mod impl_dataset;
mod impl_records;
mod impl_targets;
mod split;

pub use split::{stratified_split_indices, StratifiedSplit};

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in the records of a dataset.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq
    + 'static
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Discrete labels
///
/// Labels are countable, comparable and hashable. The total order is what gives a fitted
/// classifier its class ordering, which the confusion matrix and the tree viewer rely on.
pub trait Label: PartialEq + Eq + Hash + Clone + Ord + fmt::Debug {}

impl Label for bool {}
impl Label for usize {}
impl Label for String {}
impl Label for &str {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the data
/// and may contain targets, weights and feature names. In order to keep the type complexity low
/// the dataset base is only generic over the records and targets and introduces a trait bound on
/// the records. `weights` and `feature_names`, on the other hand, are always assumed to be owned
/// and copied when views are created.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a one-dimensional array of labels with dimensionality (nsamples)
/// * `weights`: optional weights for each sample with dimensionality (nsamples)
/// * `feature_names`: optional descriptive feature names with dimensionality (nfeatures)
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    pub weights: Array1<f32>,
    feature_names: Vec<String>,
}

/// Dataset
///
/// The most commonly used typed of dataset. It contains a number of records
/// stored as an `Array2` and a single label per record stored as an `Array1`.
pub type Dataset<D, L> = DatasetBase<Array2<D>, Array1<L>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, D, L> = DatasetBase<ArrayView2<'a, D>, ArrayView1<'a, L>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Return a view on the single target variable
pub trait AsTargets {
    type Elem;

    fn as_targets(&self) -> ArrayView1<Self::Elem>;
}

/// Get the labels in all targets
///
pub trait Labels {
    type Elem: Label;

    fn label_count(&self) -> HashMap<Self::Elem, usize>;

    /// Returns the distinct labels in ascending order
    fn label_set(&self) -> Vec<Self::Elem> {
        let mut labels = self.label_count().into_keys().collect::<Vec<_>>();
        labels.sort();
        labels
    }
}

impl<R: Records, T> fmt::Debug for DatasetBase<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetBase")
            .field("nsamples", &self.records.nsamples())
            .field("nfeatures", &self.records.nfeatures())
            .field("feature_names", &self.feature_names)
            .finish()
    }
}

impl<F, L> From<(Array2<F>, Array1<L>)> for Dataset<F, L> {
    fn from(rec_tar: (Array2<F>, Array1<L>)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}

impl<'a, F, L> From<(ArrayView2<'a, F>, ArrayView1<'a, L>)> for DatasetView<'a, F, L> {
    fn from(rec_tar: (ArrayView2<'a, F>, ArrayView1<'a, L>)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}

impl<F, S: ndarray::Data<Elem = F>, T> DatasetBase<ArrayBase<S, Ix2>, T> {
    /// Returns the value of feature `feature` for sample `sample`
    pub fn value(&self, sample: usize, feature: usize) -> &F {
        &self.records[(sample, feature)]
    }
}
