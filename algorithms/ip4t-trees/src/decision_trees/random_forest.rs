//! Random Forest Classifier
//!
//! An ensemble of decision trees, each grown on a bootstrap sample of the training set with a
//! random subset of features considered at every split.

use ip4t::dataset::{AsTargets, Labels};
use ip4t::prelude::*;
use ip4t::{error::Error, Float, Label, ParamGuard};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::marker::PhantomData;
use tracing::debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::algorithm::DecisionTree;
use super::{MaxFeatures, SplitQuality};

/// A fitted random forest
///
/// Predictions average the class distributions of the leaves reached in every tree and pick the
/// most probable class. Ties go to the class which comes first in [`classes`](Self::classes).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone)]
pub struct RandomForestClassifier<F: Float, L: Label> {
    trees: Vec<DecisionTree<F, L>>,
    classes: Vec<L>,
    num_features: usize,
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomForestValidParams<F, L> {
    n_trees: usize,
    max_depth: Option<usize>,
    max_features: MaxFeatures,
    split_quality: SplitQuality,
    bootstrap: bool,
    seed: u64,

    #[cfg_attr(feature = "serde", serde(skip))]
    marker: PhantomData<(F, L)>,
}

impl<F, L> RandomForestValidParams<F, L> {
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn max_features(&self) -> MaxFeatures {
        self.max_features
    }

    pub fn split_quality(&self) -> SplitQuality {
        self.split_quality
    }

    pub fn bootstrap(&self) -> bool {
        self.bootstrap
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// The set of hyperparameters that can be specified for fitting a
/// [random forest](struct.RandomForestClassifier.html).
///
/// ### Example
///
/// ```rust
/// use ip4t::prelude::*;
/// use ip4t_trees::RandomForestClassifier;
/// use ndarray::array;
///
/// let dataset = Dataset::new(
///     array![[1., 0.], [2., 0.], [3., 1.], [8., 1.], [9., 0.], [10., 1.]],
///     array!["tidak", "tidak", "tidak", "ya", "ya", "ya"],
/// );
///
/// let forest = RandomForestClassifier::params()
///     .n_trees(10)
///     .max_depth(Some(4))
///     .seed(42)
///     .fit(&dataset)
///     .unwrap();
///
/// assert_eq!(forest.trees().len(), 10);
/// assert_eq!(forest.classes(), &["tidak", "ya"]);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomForestParams<F, L>(RandomForestValidParams<F, L>);

impl<F: Float, L: Label> RandomForestParams<F, L> {
    pub fn new() -> Self {
        Self(RandomForestValidParams {
            n_trees: 100,
            max_depth: Some(4),
            max_features: MaxFeatures::Sqrt,
            split_quality: SplitQuality::Gini,
            bootstrap: true,
            seed: 42,
            marker: PhantomData,
        })
    }

    /// Sets the number of trees in the forest
    pub fn n_trees(mut self, n_trees: usize) -> Self {
        self.0.n_trees = n_trees;
        self
    }

    /// Sets the optional depth limit of every tree
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.0.max_depth = depth;
        self
    }

    /// Sets how many features every split considers
    pub fn max_features(mut self, max_features: MaxFeatures) -> Self {
        self.0.max_features = max_features;
        self
    }

    /// Sets the metric used to decide splits
    pub fn split_quality(mut self, split_quality: SplitQuality) -> Self {
        self.0.split_quality = split_quality;
        self
    }

    /// Whether every tree is fit on a bootstrap sample or on the full training set
    pub fn bootstrap(mut self, bootstrap: bool) -> Self {
        self.0.bootstrap = bootstrap;
        self
    }

    /// Sets the seed, fixing bootstrap samples and feature subsets
    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }
}

impl<F: Float, L: Label> Default for RandomForestParams<F, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float, L: Label> RandomForestClassifier<F, L> {
    /// Defaults are provided if the optional parameters are not specified:
    /// * `n_trees = 100`
    /// * `max_depth = Some(4)`
    /// * `max_features = MaxFeatures::Sqrt`
    /// * `split_quality = SplitQuality::Gini`
    /// * `bootstrap = true`
    /// * `seed = 42`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> RandomForestParams<F, L> {
        RandomForestParams::new()
    }
}

impl<F, L> ParamGuard for RandomForestParams<F, L> {
    type Checked = RandomForestValidParams<F, L>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_trees == 0 {
            Err(Error::Parameters(
                "number of trees should be at least one".to_string(),
            ))
        } else if self.0.max_depth == Some(0) {
            Err(Error::Parameters(
                "maximum depth should be at least one".to_string(),
            ))
        } else if self.0.max_features == MaxFeatures::Count(0) {
            Err(Error::Parameters(
                "at least one feature has to be considered per split".to_string(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// Draw `n` row indices with replacement
fn bootstrap_indices(n: usize, rng: &mut impl Rng) -> Vec<usize> {
    (0..n).map(|_| rng.gen_range(0..n)).collect()
}

impl<F: Float, L: Label, D, T> Fit<ArrayBase<D, Ix2>, T, Error> for RandomForestValidParams<F, L>
where
    D: Data<Elem = F>,
    T: AsTargets<Elem = L> + Labels<Elem = L>,
{
    type Object = RandomForestClassifier<F, L>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let nsamples = dataset.nsamples();
        if nsamples == 0 {
            return Err(Error::NotEnoughSamples);
        }
        if dataset.nfeatures() == 0 {
            return Err(Error::ZeroFeatures);
        }
        let targets = dataset.targets().as_targets();
        if targets.len() != nsamples {
            return Err(Error::MismatchedShapes {
                samples: nsamples,
                targets: targets.len(),
            });
        }

        let classes = dataset.targets().label_set();
        if classes.len() < 2 {
            return Err(Error::NotEnoughClasses(classes.len()));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut trees = Vec::with_capacity(self.n_trees);

        for tree_idx in 0..self.n_trees {
            let indices = if self.bootstrap {
                bootstrap_indices(nsamples, &mut rng)
            } else {
                (0..nsamples).collect()
            };

            let sample_set = Dataset::new(
                dataset.records().select(Axis(0), &indices),
                targets.select(Axis(0), &indices),
            )
            .with_feature_names(dataset.feature_names());

            let tree = DecisionTree::params()
                .max_depth(self.max_depth)
                .max_features(self.max_features)
                .split_quality(self.split_quality)
                .seed(rng.gen())
                .fit(&sample_set)?;

            debug!(
                tree = tree_idx + 1,
                depth = tree.max_depth(),
                leaves = tree.num_leaves(),
                "grown tree"
            );
            trees.push(tree);
        }

        Ok(RandomForestClassifier {
            trees,
            classes,
            num_features: dataset.nfeatures(),
        })
    }
}

impl<F: Float, L: Label> RandomForestClassifier<F, L> {
    /// The member trees, in the order they were grown
    pub fn trees(&self) -> &[DecisionTree<F, L>] {
        &self.trees
    }

    /// The class ordering of the forest: the distinct training labels, sorted ascending
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    /// Number of features the forest was fit with
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Mean class probabilities of every row, columns follow [`classes`](Self::classes)
    ///
    /// Every tree contributes the normalized class distribution of the leaf the row reaches.
    /// Classes absent from the bootstrap sample of a tree receive zero probability from it.
    pub fn predict_probabilities<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Array2<f32> {
        let mut probabilities = Array2::zeros((x.nrows(), self.classes.len()));

        for tree in &self.trees {
            // map the tree's class ordering onto the forest's
            let positions = tree
                .classes()
                .iter()
                .map(|c| self.classes.binary_search(c).ok())
                .collect::<Vec<_>>();

            for (row, mut probs) in x.rows().into_iter().zip(probabilities.rows_mut()) {
                let leaf = tree.leaf_for(&row);
                let total = leaf.class_distribution().iter().sum::<f32>();
                if total <= 0.0 {
                    continue;
                }
                for (pos, count) in positions.iter().zip(leaf.class_distribution()) {
                    if let Some(pos) = pos {
                        probs[*pos] += count / total;
                    }
                }
            }
        }

        probabilities / self.trees.len().max(1) as f32
    }

    fn most_probable(&self, probs: &ArrayBase<impl Data<Elem = f32>, Ix1>) -> L {
        let best = probs
            .iter()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |(best, best_p), (idx, p)| {
                if *p > best_p {
                    (idx, *p)
                } else {
                    (best, best_p)
                }
            })
            .0;

        self.classes[best].clone()
    }
}

impl<F: Float, L: Label + Default, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<L>>
    for RandomForestClassifier<F, L>
{
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<L>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );

        let probabilities = self.predict_probabilities(x);
        for (probs, target) in probabilities.rows().into_iter().zip(y.iter_mut()) {
            *target = self.most_probable(&probs);
        }
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<L> {
        Array1::default(x.nrows())
    }
}
