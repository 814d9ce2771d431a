//! One-hot encoding of categorical columns
use std::collections::BTreeSet;

use ip4t::dataset::{DatasetBase, Records};
use ip4t::traits::{Fit, Transformer};
use ip4t::Float;
use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};

use crate::error::{PreprocessingError, Result};

/// One-hot encoder for categorical records
///
/// Records are a matrix of optional strings, one column per categorical feature, with the
/// feature names of the dataset naming the columns. Fitting collects the categories present in
/// every column. Missing cells are not a category.
///
/// ### Example
///
/// ```rust
/// use ip4t::traits::{Fit, Transformer};
/// use ip4t::DatasetBase;
/// use ip4t_preprocessing::OneHotEncoder;
/// use ndarray::{array, Array2};
///
/// let records = array![[Some("JALAN".to_string())], [Some("SAWAH".to_string())], [None]];
/// let train = DatasetBase::new(records, ()).with_feature_names(vec!["PENGGUNAAN"]);
///
/// let encoder = OneHotEncoder::default().fit(&train).unwrap();
/// assert_eq!(encoder.feature_names(), vec!["PENGGUNAAN_JALAN", "PENGGUNAAN_SAWAH"]);
///
/// let encoded: Array2<f64> = encoder.transform(train.records());
/// assert_eq!(encoded, array![[1., 0.], [0., 1.], [0., 0.]]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneHotEncoder;

impl OneHotEncoder {
    pub fn new() -> Self {
        OneHotEncoder
    }
}

/// A fitted one-hot encoder
///
/// Every input column expands into one indicator column per category seen while fitting, in
/// lexicographic order. Unknown categories and missing cells encode to an all-zero block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedOneHotEncoder {
    columns: Vec<String>,
    categories: Vec<Vec<String>>,
}

impl<S: Data<Elem = Option<String>>, T> Fit<ArrayBase<S, Ix2>, T, PreprocessingError>
    for OneHotEncoder
{
    type Object = FittedOneHotEncoder;

    fn fit(&self, x: &DatasetBase<ArrayBase<S, Ix2>, T>) -> Result<Self::Object> {
        let categories = x
            .records()
            .axis_iter(Axis(1))
            .map(|column| {
                column
                    .iter()
                    .flatten()
                    .cloned()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(FittedOneHotEncoder {
            columns: x.feature_names(),
            categories,
        })
    }
}

impl FittedOneHotEncoder {
    /// Names of the encoded columns, `<column>_<category>`
    pub fn feature_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(&self.categories)
            .flat_map(|(column, categories)| {
                categories
                    .iter()
                    .map(move |category| format!("{}_{}", column, category))
            })
            .collect()
    }

    /// Number of encoded columns
    pub fn nfeatures(&self) -> usize {
        self.categories.iter().map(|c| c.len()).sum()
    }

    /// Categories of every input column, in encoding order
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    /// Number of input columns the encoder was fit with
    pub fn ncolumns(&self) -> usize {
        self.columns.len()
    }
}

impl<'a, F: Float, S: Data<Elem = Option<String>>> Transformer<&'a ArrayBase<S, Ix2>, Array2<F>>
    for FittedOneHotEncoder
{
    /// Encode every row, never fails on categories unseen while fitting
    ///
    /// ### Panics
    ///
    /// If `x` has a different number of columns than the records the encoder was fit with
    fn transform(&self, x: &'a ArrayBase<S, Ix2>) -> Array2<F> {
        assert_eq!(
            x.nfeatures(),
            self.columns.len(),
            "The number of columns must match the number of fitted columns."
        );

        let mut encoded = Array2::zeros((x.nsamples(), self.nfeatures()));
        let mut offset = 0;
        for (column, categories) in x.axis_iter(Axis(1)).zip(&self.categories) {
            for (row, cell) in column.iter().enumerate() {
                let position = cell
                    .as_ref()
                    .and_then(|value| categories.binary_search(value).ok());
                if let Some(position) = position {
                    encoded[(row, offset + position)] = F::one();
                }
            }
            offset += categories.len();
        }

        encoded
    }
}
