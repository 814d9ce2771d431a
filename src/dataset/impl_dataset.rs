use super::{
    split::stratified_split_indices, AsTargets, Dataset, DatasetBase, DatasetView, Label,
    Records,
};
use crate::error::{Error, Result};
use ndarray::{Array1, ArrayBase, Axis, Data, Ix1, Ix2};
use rand::Rng;
use std::collections::HashMap;

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and mutation of datasets. This
/// includes swapping the targets, return the records etc.
impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Example
    ///
    /// ```ignore
    /// let dataset = Dataset::new(records, targets);
    /// ```
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records,
            targets,
            weights: Array1::zeros(0),
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Returns optionally weights
    pub fn weights(&self) -> Option<&[f32]> {
        if !self.weights.is_empty() {
            Some(self.weights.as_slice().unwrap_or(&[]))
        } else {
            None
        }
    }

    /// Return a single weight
    ///
    /// The weight of the `idx`th observation is returned. If no weight is specified, then all
    /// observations are unweighted with default value `1.0`.
    pub fn weight_for(&self, idx: usize) -> f32 {
        self.weights.get(idx).copied().unwrap_or(1.0)
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// This allow the reader to understand its purpose while analysing results, for example
    /// when a single tree of the forest is rendered.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }

    /// Return records of a dataset
    ///
    /// The records are data points from which predictions are made. This functions returns a
    /// reference to the record field.
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Updates the records of a dataset
    ///
    /// This function overwrites the records in a dataset. It also invalidates the weights and
    /// feature names.
    pub fn with_records<T2: Records>(self, records: T2) -> DatasetBase<T2, T> {
        DatasetBase {
            records,
            targets: self.targets,
            weights: Array1::zeros(0),
            feature_names: Vec::new(),
        }
    }

    /// Updates the targets of a dataset
    ///
    /// This function overwrites the targets in a dataset.
    pub fn with_targets<T2>(self, targets: T2) -> DatasetBase<R, T2> {
        DatasetBase {
            records: self.records,
            targets,
            weights: self.weights,
            feature_names: self.feature_names,
        }
    }

    /// Updates the weights of a dataset
    pub fn with_weights(mut self, weights: Array1<f32>) -> DatasetBase<R, T> {
        self.weights = weights;

        self
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, T> {
        let feature_names = names.into_iter().map(|x| x.into()).collect();

        self.feature_names = feature_names;

        self
    }

    /// Returns the number of samples
    pub fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    /// Returns the number of features
    pub fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }
}

impl<R: Records, L: Label, T: AsTargets<Elem = L>> DatasetBase<R, T> {
    /// Calculate the weighted frequency of every label
    ///
    /// Counts every label in the targets, scaled by the weight of the observation.
    pub fn label_frequencies(&self) -> HashMap<L, f32> {
        let mask = vec![true; self.targets.as_targets().len()];
        self.label_frequencies_with_mask(&mask)
    }

    /// Calculate the weighted frequency of every label among the masked observations
    ///
    /// ### Parameters
    ///
    /// * `mask`: `true` for every observation which should be counted
    pub fn label_frequencies_with_mask(&self, mask: &[bool]) -> HashMap<L, f32> {
        let mut freqs = HashMap::new();

        for (idx, label) in self
            .targets
            .as_targets()
            .iter()
            .enumerate()
            .filter(|(idx, _)| mask[*idx])
        {
            *freqs.entry(label.clone()).or_insert(0.0) += self.weight_for(idx);
        }

        freqs
    }
}

impl<F: Clone, L: Clone, D, S> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>
where
    D: Data<Elem = F>,
    S: Data<Elem = L>,
{
    /// Creates a view of a dataset
    pub fn view(&self) -> DatasetView<'_, F, L> {
        DatasetBase::new(self.records.view(), self.targets.view())
            .with_feature_names(self.feature_names.clone())
            .with_weights(self.weights.clone())
    }

    /// Select the observations at `indices` into a new, owned dataset
    ///
    /// Feature names are kept, weights are selected alongside the records.
    pub fn select(&self, indices: &[usize]) -> Dataset<F, L> {
        let records = self.records.select(Axis(0), indices);
        let targets = self.targets.select(Axis(0), indices);
        let weights = if self.weights.is_empty() {
            Array1::zeros(0)
        } else {
            self.weights.select(Axis(0), indices)
        };

        DatasetBase::new(records, targets)
            .with_feature_names(self.feature_names.clone())
            .with_weights(weights)
    }
}

impl<F: Clone, L: Label, D, S> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>
where
    D: Data<Elem = F>,
    S: Data<Elem = L>,
{
    /// Split the dataset into a training and a validation part, preserving class proportions
    ///
    /// `ratio` is the fraction of observations kept for training. Both parts contain every class
    /// in (approximately) the same proportion as the full dataset and every class keeps at least
    /// one observation in the training part.
    pub fn stratified_split_with_ratio<R: Rng>(
        &self,
        ratio: f32,
        rng: &mut R,
    ) -> Result<(Dataset<F, L>, Dataset<F, L>)> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(Error::Parameters(format!(
                "split ratio should be in (0, 1), but was {}",
                ratio
            )));
        }

        let labels = self.targets.to_vec();
        let split = stratified_split_indices(&labels, 1.0 - f64::from(ratio), rng)?;

        Ok((self.select(&split.train), self.select(&split.test)))
    }
}
