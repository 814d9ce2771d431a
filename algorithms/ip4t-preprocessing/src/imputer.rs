//! Median imputation of missing numeric cells
use ip4t::dataset::{DatasetBase, Records};
use ip4t::traits::{Fit, Transformer};
use ip4t::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};

use crate::error::{PreprocessingError, Result};

/// Replaces missing numeric cells with the median of their column
///
/// The medians are learned from the records the imputer is fit on. A column without any present
/// value is imputed with zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MedianImputer;

impl MedianImputer {
    pub fn new() -> Self {
        MedianImputer
    }
}

/// Medians learned by a [`MedianImputer`]
#[derive(Debug, Clone, PartialEq)]
pub struct FittedMedianImputer<F> {
    medians: Array1<F>,
}

impl<F: Float> FittedMedianImputer<F> {
    /// The fill value of every column
    pub fn medians(&self) -> &Array1<F> {
        &self.medians
    }
}

/// Median of the present values, the mean of both middle values for an even count
fn median<'a, F: Float>(values: impl Iterator<Item = &'a Option<F>>) -> Option<F> {
    let mut present = values.flatten().copied().collect::<Vec<_>>();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        Some((present[mid - 1] + present[mid]) / F::cast(2.0))
    } else {
        Some(present[mid])
    }
}

impl<F: Float, S: Data<Elem = Option<F>>, T> Fit<ArrayBase<S, Ix2>, T, PreprocessingError>
    for MedianImputer
{
    type Object = FittedMedianImputer<F>;

    fn fit(&self, x: &DatasetBase<ArrayBase<S, Ix2>, T>) -> Result<Self::Object> {
        let medians = x
            .records()
            .axis_iter(Axis(1))
            .map(|column| median(column.iter()).unwrap_or_else(F::zero))
            .collect();

        Ok(FittedMedianImputer { medians })
    }
}

impl<'a, F: Float, S: Data<Elem = Option<F>>> Transformer<&'a ArrayBase<S, Ix2>, Array2<F>>
    for FittedMedianImputer<F>
{
    /// ### Panics
    ///
    /// If `x` has a different number of columns than the records the imputer was fit with
    fn transform(&self, x: &'a ArrayBase<S, Ix2>) -> Array2<F> {
        assert_eq!(
            x.nfeatures(),
            self.medians.len(),
            "The number of columns must match the number of fitted columns."
        );

        let mut out = Array2::zeros((x.nsamples(), x.nfeatures()));
        for (mut out_col, (col, median)) in out
            .axis_iter_mut(Axis(1))
            .zip(x.axis_iter(Axis(1)).zip(self.medians.iter()))
        {
            Zip::from(&mut out_col)
                .and(&col)
                .for_each(|o, cell| *o = cell.unwrap_or(*median));
        }

        out
    }
}
