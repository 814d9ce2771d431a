//! Encoding of mixed tables into a numeric feature matrix
//!
//! A [`FeatureFrame`] holds the numeric and the categorical columns of some rows of a table. The
//! [`FeatureEncoder`] learns numeric medians and categorical vocabularies from the training frame,
//! and the fitted encoder maps any frame onto the same feature columns: numeric columns first, in
//! table order, followed by the one-hot indicator columns.
use ip4t::dataset::{DatasetBase, Records};
use ip4t::traits::{Fit, Transformer};
use ip4t::Float;
use ndarray::{concatenate, s, Array2, Axis};
use tracing::debug;

use crate::error::{PreprocessingError, Result};
use crate::imputer::{FittedMedianImputer, MedianImputer};
use crate::one_hot::{FittedOneHotEncoder, OneHotEncoder};

/// Numeric and categorical columns of a set of table rows
///
/// `rows` holds the original row index of every row, so encoded matrices can be related back to
/// the table they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame<F> {
    rows: Vec<usize>,
    numeric: Array2<Option<F>>,
    numeric_names: Vec<String>,
    categorical: Array2<Option<String>>,
    categorical_names: Vec<String>,
}

impl<F: Float> FeatureFrame<F> {
    /// Create a frame, checking that row counts and column names line up
    pub fn new(
        rows: Vec<usize>,
        numeric: Array2<Option<F>>,
        numeric_names: Vec<String>,
        categorical: Array2<Option<String>>,
        categorical_names: Vec<String>,
    ) -> Result<Self> {
        for (what, found) in [
            ("numeric block", numeric.nrows()),
            ("categorical block", categorical.nrows()),
        ] {
            if found != rows.len() {
                return Err(PreprocessingError::MismatchedRows {
                    what,
                    expected: rows.len(),
                    found,
                });
            }
        }
        for (what, expected, found) in [
            ("numeric block", numeric.ncols(), numeric_names.len()),
            (
                "categorical block",
                categorical.ncols(),
                categorical_names.len(),
            ),
        ] {
            if found != expected {
                return Err(PreprocessingError::MismatchedNames {
                    what,
                    expected,
                    found,
                });
            }
        }

        Ok(FeatureFrame {
            rows,
            numeric,
            numeric_names,
            categorical,
            categorical_names,
        })
    }

    /// Original row index of every row
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn numeric(&self) -> &Array2<Option<F>> {
        &self.numeric
    }

    pub fn numeric_names(&self) -> &[String] {
        &self.numeric_names
    }

    pub fn categorical(&self) -> &Array2<Option<String>> {
        &self.categorical
    }

    pub fn categorical_names(&self) -> &[String] {
        &self.categorical_names
    }

    /// Select rows by position into a new frame
    pub fn select(&self, positions: &[usize]) -> Self {
        FeatureFrame {
            rows: positions.iter().map(|p| self.rows[*p]).collect(),
            numeric: self.numeric.select(Axis(0), positions),
            numeric_names: self.numeric_names.clone(),
            categorical: self.categorical.select(Axis(0), positions),
            categorical_names: self.categorical_names.clone(),
        }
    }
}

impl<F> Records for FeatureFrame<F> {
    type Elem = F;

    fn nsamples(&self) -> usize {
        self.rows.len()
    }

    fn nfeatures(&self) -> usize {
        self.numeric.ncols() + self.categorical.ncols()
    }
}

/// Learns the encoding of a [`FeatureFrame`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        FeatureEncoder
    }

    /// Fit on `train` and encode both partitions
    pub fn encode_split<F: Float>(
        &self,
        train: &FeatureFrame<F>,
        test: &FeatureFrame<F>,
    ) -> Result<EncodedSplit<F>> {
        let encoder = self.fit(&DatasetBase::new(train.clone(), ()))?;

        Ok(EncodedSplit {
            train: encoder.transform(train),
            test: encoder.transform(test),
            feature_names: encoder.feature_names(),
            train_rows: train.rows().to_vec(),
            test_rows: test.rows().to_vec(),
        })
    }
}

/// Median imputer and one-hot encoder fit on the same training frame
#[derive(Debug, Clone, PartialEq)]
pub struct FittedFeatureEncoder<F> {
    imputer: FittedMedianImputer<F>,
    one_hot: FittedOneHotEncoder,
    feature_names: Vec<String>,
}

impl<F: Float> FittedFeatureEncoder<F> {
    /// Names of the encoded columns, numeric names followed by `<column>_<category>`
    pub fn feature_names(&self) -> Vec<String> {
        self.feature_names.clone()
    }

    pub fn nfeatures(&self) -> usize {
        self.feature_names.len()
    }

    pub fn imputer(&self) -> &FittedMedianImputer<F> {
        &self.imputer
    }

    pub fn one_hot(&self) -> &FittedOneHotEncoder {
        &self.one_hot
    }
}

impl<F: Float, T> Fit<FeatureFrame<F>, T, PreprocessingError> for FeatureEncoder {
    type Object = FittedFeatureEncoder<F>;

    fn fit(&self, x: &DatasetBase<FeatureFrame<F>, T>) -> Result<Self::Object> {
        let frame = x.records();
        if frame.nsamples() == 0 {
            return Err(PreprocessingError::EmptyTrainingSet);
        }

        let imputer = MedianImputer::new().fit(
            &DatasetBase::new(frame.numeric().view(), ())
                .with_feature_names(frame.numeric_names().to_vec()),
        )?;
        let one_hot = OneHotEncoder::new().fit(
            &DatasetBase::new(frame.categorical().view(), ())
                .with_feature_names(frame.categorical_names().to_vec()),
        )?;

        let feature_names = frame
            .numeric_names()
            .iter()
            .cloned()
            .chain(one_hot.feature_names())
            .collect::<Vec<_>>();
        if feature_names.is_empty() {
            return Err(PreprocessingError::ZeroFeatures);
        }

        debug!(
            numeric = frame.numeric_names().len(),
            indicators = one_hot.nfeatures(),
            "fitted feature encoder"
        );

        Ok(FittedFeatureEncoder {
            imputer,
            one_hot,
            feature_names,
        })
    }
}

impl<'a, F: Float> Transformer<&'a FeatureFrame<F>, Array2<F>> for FittedFeatureEncoder<F> {
    /// ### Panics
    ///
    /// If `x` has other numeric or categorical columns than the frame the encoder was fit with
    fn transform(&self, x: &'a FeatureFrame<F>) -> Array2<F> {
        let numeric = self.imputer.transform(x.numeric());
        let indicators: Array2<F> = self.one_hot.transform(x.categorical());

        let mut encoded = Array2::zeros((x.nsamples(), self.nfeatures()));
        encoded.slice_mut(s![.., ..numeric.ncols()]).assign(&numeric);
        encoded.slice_mut(s![.., numeric.ncols()..]).assign(&indicators);

        encoded
    }
}

/// Encoded training and test partitions
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSplit<F> {
    pub train: Array2<F>,
    pub test: Array2<F>,
    pub feature_names: Vec<String>,
    /// Original row index of every training row
    pub train_rows: Vec<usize>,
    /// Original row index of every test row
    pub test_rows: Vec<usize>,
}

impl<F: Float> EncodedSplit<F> {
    /// Training rows followed by test rows
    ///
    /// Fails if the partitions have a different number of columns.
    pub fn combined(&self) -> Result<Array2<F>> {
        let combined = concatenate(Axis(0), &[self.train.view(), self.test.view()])
            .map_err(ip4t::error::Error::from)?;

        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn cell(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn frame(
        rows: Vec<usize>,
        numeric: Array2<Option<f64>>,
        categorical: Array2<Option<String>>,
    ) -> FeatureFrame<f64> {
        FeatureFrame::new(
            rows,
            numeric,
            vec!["Luas  m2".to_string()],
            categorical,
            vec!["KABUPATEN".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn numeric_columns_come_first() {
        let train = frame(
            vec![0, 2, 3],
            array![[Some(10.0)], [None], [Some(30.0)]],
            array![[cell("BOGOR")], [cell("BEKASI")], [cell("BOGOR")]],
        );
        let test = frame(vec![1], array![[None]], array![[cell("DEPOK")]]);

        let split = FeatureEncoder::new().encode_split(&train, &test).unwrap();

        assert_eq!(
            split.feature_names,
            vec!["Luas  m2", "KABUPATEN_BEKASI", "KABUPATEN_BOGOR"]
        );
        assert_abs_diff_eq!(
            split.train,
            array![[10.0, 0.0, 1.0], [20.0, 1.0, 0.0], [30.0, 0.0, 1.0]]
        );
        // unseen category and missing area
        assert_abs_diff_eq!(split.test, array![[20.0, 0.0, 0.0]]);
        assert_eq!(split.train_rows, vec![0, 2, 3]);
        assert_eq!(split.test_rows, vec![1]);
        assert_abs_diff_eq!(
            split.combined().unwrap(),
            array![
                [10.0, 0.0, 1.0],
                [20.0, 1.0, 0.0],
                [30.0, 0.0, 1.0],
                [20.0, 0.0, 0.0]
            ]
        );
    }

    #[test]
    fn combined_rejects_mismatched_partitions() {
        let split = EncodedSplit {
            train: array![[1.0, 0.0], [2.0, 1.0]],
            test: array![[3.0]],
            feature_names: vec!["Luas  m2".to_string(), "KABUPATEN_BOGOR".to_string()],
            train_rows: vec![0, 1],
            test_rows: vec![2],
        };

        assert!(matches!(
            split.combined(),
            Err(PreprocessingError::BaseCrate(ip4t::error::Error::NdShape(_)))
        ));
    }

    #[test]
    fn empty_training_frame_is_rejected() {
        let train = frame(
            vec![],
            Array2::from_shape_vec((0, 1), vec![]).unwrap(),
            Array2::from_shape_vec((0, 1), vec![]).unwrap(),
        );
        let res = FeatureEncoder::new().encode_split(&train, &train);

        assert!(matches!(res, Err(PreprocessingError::EmptyTrainingSet)));
    }

    #[test]
    fn no_feature_columns_is_rejected() {
        let train = FeatureFrame::<f64>::new(
            vec![0, 1],
            Array2::from_shape_vec((2, 0), vec![]).unwrap(),
            vec![],
            array![[None], [None]],
            vec!["KOSONG".to_string()],
        )
        .unwrap();
        let res = FeatureEncoder::new().encode_split(&train, &train);

        assert!(matches!(res, Err(PreprocessingError::ZeroFeatures)));
    }

    #[test]
    fn mismatched_blocks_are_rejected() {
        let res = FeatureFrame::<f64>::new(
            vec![0, 1],
            array![[Some(1.0)]],
            vec!["Luas  m2".to_string()],
            array![[None], [None]],
            vec!["KABUPATEN".to_string()],
        );
        assert!(matches!(
            res,
            Err(PreprocessingError::MismatchedRows { found: 1, .. })
        ));

        let res = FeatureFrame::<f64>::new(
            vec![0],
            array![[Some(1.0)]],
            vec![],
            array![[None]],
            vec!["KABUPATEN".to_string()],
        );
        assert!(matches!(
            res,
            Err(PreprocessingError::MismatchedNames { .. })
        ));
    }

    #[test]
    fn selected_frames_keep_original_rows() {
        let frame = frame(
            vec![4, 7, 9],
            array![[Some(1.0)], [Some(2.0)], [Some(3.0)]],
            array![[cell("A")], [cell("B")], [cell("C")]],
        );
        let selected = frame.select(&[2, 0]);

        assert_eq!(selected.rows(), &[9, 4]);
        assert_eq!(selected.numeric(), &array![[Some(3.0)], [Some(1.0)]]);
        assert_eq!(selected.nfeatures(), 2);
    }
}
