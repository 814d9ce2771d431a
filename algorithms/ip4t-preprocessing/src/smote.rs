//! Synthetic minority oversampling
//!
//! Every class with fewer samples than the largest class is filled up with synthetic samples. A
//! synthetic sample lies on the segment between a random member of the class and one of its `k`
//! nearest neighbours within the same class. Classes sharing the largest count are left alone.
use std::fmt;

use ip4t::dataset::{AsTargets, Dataset, DatasetBase, Label, Labels};
use ip4t::error::Error;
use ip4t::{Float, ParamGuard};
use ip4t_nn::distance::L2Dist;
use ip4t_nn::{LinearSearch, NearestNeighbour};
use ndarray::{concatenate, Array1, Array2, ArrayBase, Axis, Data, Ix2};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{PreprocessingError, Result};

/// Minority oversampler
pub struct Smote;

impl Smote {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `k_neighbors = 1`
    /// * `seed = 42`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> SmoteParams {
        SmoteParams::new()
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SmoteValidParams {
    k_neighbors: usize,
    seed: u64,
}

impl SmoteValidParams {
    pub fn k_neighbors(&self) -> usize {
        self.k_neighbors
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Oversample every minority class of `dataset` up to the size of the largest class
    ///
    /// The returned dataset starts with the original rows in their original order. The synthetic
    /// rows follow, grouped by class in class order. Feature names are carried over.
    pub fn resample<F, L, D, T>(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
    ) -> Result<Dataset<F, L>>
    where
        F: Float,
        L: Label + fmt::Display,
        D: Data<Elem = F>,
        T: AsTargets<Elem = L>,
    {
        let records = dataset.records();
        let targets = dataset.as_targets();

        if records.nrows() != targets.len() {
            return Err(Error::MismatchedShapes {
                samples: records.nrows(),
                targets: targets.len(),
            }
            .into());
        }
        if records.nrows() == 0 {
            return Err(PreprocessingError::EmptyTrainingSet);
        }
        if records.ncols() == 0 {
            return Err(PreprocessingError::ZeroFeatures);
        }

        let k = self.k_neighbors;
        let counts = dataset.label_count();
        let majority = counts.values().copied().max().unwrap_or(0);
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut synthetic = Vec::new();
        let mut synthetic_targets = Vec::new();
        for class in dataset.label_set() {
            let count = counts[&class];
            if count == majority {
                continue;
            }
            if count < k + 1 {
                return Err(PreprocessingError::InsufficientMinoritySamples {
                    class: class.to_string(),
                    count,
                    required: k + 1,
                });
            }

            let members = targets
                .iter()
                .enumerate()
                .filter(|(_, t)| **t == class)
                .map(|(i, _)| i)
                .collect::<Vec<_>>();
            let points = records.select(Axis(0), &members);
            let index = LinearSearch::new(points.view(), L2Dist)?;

            // the k nearest other members of every member, the member itself excluded
            let mut neighbours = Vec::with_capacity(count);
            for (pos, point) in points.rows().into_iter().enumerate() {
                let nearest = index
                    .k_nearest(point, k + 1)?
                    .into_iter()
                    .map(|(_, i)| i)
                    .filter(|i| *i != pos)
                    .take(k)
                    .collect::<Vec<_>>();
                neighbours.push(nearest);
            }

            let missing = majority - count;
            for _ in 0..missing {
                let draw = rng.gen_range(0..count * k);
                let (row, col) = (draw / k, draw % k);
                let gap = F::cast(rng.gen::<f64>());

                let base = points.row(row);
                let other = points.row(neighbours[row][col]);
                synthetic.extend(
                    base.iter()
                        .zip(other.iter())
                        .map(|(a, b)| *a + gap * (*b - *a)),
                );
                synthetic_targets.push(class.clone());
            }

            debug!(%class, original = count, synthetic = missing, "oversampled class");
        }

        let synthetic =
            Array2::from_shape_vec((synthetic_targets.len(), records.ncols()), synthetic)
                .map_err(Error::from)?;
        let resampled =
            concatenate(Axis(0), &[records.view(), synthetic.view()]).map_err(Error::from)?;
        let targets = targets
            .iter()
            .cloned()
            .chain(synthetic_targets)
            .collect::<Array1<_>>();

        Ok(Dataset::new(resampled, targets).with_feature_names(dataset.feature_names()))
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SmoteParams(SmoteValidParams);

impl SmoteParams {
    pub fn new() -> Self {
        SmoteParams(SmoteValidParams {
            k_neighbors: 1,
            seed: 42,
        })
    }

    /// Sets the number of same-class neighbours a synthetic sample may be drawn towards
    pub fn k_neighbors(mut self, k_neighbors: usize) -> Self {
        self.0.k_neighbors = k_neighbors;
        self
    }

    /// Sets the seed of the generator drawing the synthetic samples
    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }

    /// Check the parameters and oversample `dataset`
    pub fn resample<F, L, D, T>(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
    ) -> Result<Dataset<F, L>>
    where
        F: Float,
        L: Label + fmt::Display,
        D: Data<Elem = F>,
        T: AsTargets<Elem = L>,
    {
        self.check_ref()?.resample(dataset)
    }
}

impl Default for SmoteParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamGuard for SmoteParams {
    type Checked = SmoteValidParams;
    type Error = PreprocessingError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.k_neighbors == 0 {
            Err(PreprocessingError::InvalidNeighbourCount(self.0.k_neighbors))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn unbalanced() -> Dataset<f64, &'static str> {
        Dataset::new(
            array![
                [0., 0.],
                [1., 0.],
                [2., 0.],
                [3., 0.],
                [4., 0.],
                [10., 10.],
                [11., 10.],
                [20., 20.],
                [20., 22.]
            ],
            array!["TIDAK", "TIDAK", "TIDAK", "TIDAK", "TIDAK", "YA", "YA", "RAGU", "RAGU"],
        )
        .with_feature_names(vec!["luas", "jarak"])
    }

    #[test]
    fn minority_classes_reach_majority_count() {
        let resampled = Smote::params().resample(&unbalanced()).unwrap();
        let counts = resampled.label_count();

        assert_eq!(resampled.nsamples(), 15);
        assert_eq!(counts["TIDAK"], 5);
        assert_eq!(counts["YA"], 5);
        assert_eq!(counts["RAGU"], 5);
        assert_eq!(resampled.feature_names(), vec!["luas", "jarak"]);
    }

    #[test]
    fn originals_come_first_then_classes_in_order() {
        let original = unbalanced();
        let resampled = Smote::params().resample(&original).unwrap();

        assert_eq!(
            resampled.records().slice(ndarray::s![..9, ..]),
            original.records().view()
        );
        let tail = resampled.targets().iter().skip(9).copied().collect::<Vec<_>>();
        assert_eq!(tail, vec!["RAGU", "RAGU", "RAGU", "YA", "YA", "YA"]);
    }

    #[test]
    fn synthetic_samples_lie_between_neighbours() {
        let resampled = Smote::params().resample(&unbalanced()).unwrap();

        for (row, class) in resampled
            .records()
            .rows()
            .into_iter()
            .zip(resampled.targets().iter())
            .skip(9)
        {
            match *class {
                "RAGU" => {
                    assert!((row[0] - 20.).abs() < 1e-12);
                    assert!(row[1] >= 20. && row[1] <= 22.);
                }
                "YA" => {
                    assert!(row[0] >= 10. && row[0] <= 11.);
                    assert!((row[1] - 10.).abs() < 1e-12);
                }
                other => panic!("majority class {} was oversampled", other),
            }
        }
    }

    #[test]
    fn same_seed_gives_same_samples() {
        let a = Smote::params().resample(&unbalanced()).unwrap();
        let b = Smote::params().resample(&unbalanced()).unwrap();

        assert_eq!(a.records(), b.records());
    }

    #[test]
    fn balanced_dataset_is_unchanged() {
        let dataset = Dataset::new(array![[0.], [1.], [2.], [3.]], array![0usize, 1, 0, 1]);
        let resampled = Smote::params().resample(&dataset).unwrap();

        assert_eq!(resampled.records(), dataset.records());
        assert_eq!(resampled.targets(), dataset.targets());
    }

    #[test]
    fn singleton_minority_class_is_rejected() {
        let dataset = Dataset::new(array![[0.], [1.], [2.], [9.]], array!["A", "A", "A", "B"]);
        let res = Smote::params().resample(&dataset);

        match res {
            Err(PreprocessingError::InsufficientMinoritySamples {
                class,
                count,
                required,
            }) => {
                assert_eq!(class, "B");
                assert_eq!(count, 1);
                assert_eq!(required, 2);
            }
            other => panic!("unexpected result {:?}", other.map(|d| d.nsamples())),
        }
    }

    #[test]
    fn zero_neighbours_is_rejected() {
        let params = Smote::params().k_neighbors(0);

        assert!(matches!(
            params.check(),
            Err(PreprocessingError::InvalidNeighbourCount(0))
        ));
    }
}
