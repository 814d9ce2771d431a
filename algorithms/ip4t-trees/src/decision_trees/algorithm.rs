//! Linear decision trees
//!
use ndarray::{Array1, ArrayBase, Axis, Data, Ix1, Ix2};
use rand::{rngs::StdRng, seq::index::sample, Rng, SeedableRng};

use super::NodeIter;
use super::TreeText;
use super::{DecisionTreeValidParams, SplitQuality};
use ip4t::{
    dataset::{AsTargets, Labels, Records},
    error::Error,
    error::Result,
    traits::*,
    DatasetBase, Float, Label,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// RowMask tracks observations
///
/// The decision tree algorithm splits observations at a certain split value for a specific feature. The
/// left and right children can then only use a certain number of observations. In order to track
/// that, the observations are masked with a boolean vector, hiding all observations which are not
/// applicable in a lower tree.
struct RowMask {
    mask: Vec<bool>,
    nsamples: usize,
}

impl RowMask {
    /// Generates a RowMask without hidden observations
    fn all(nsamples: usize) -> Self {
        RowMask {
            mask: vec![true; nsamples],
            nsamples,
        }
    }

    /// Generates a RowMask where all observations are hidden
    fn none(nsamples: usize) -> Self {
        RowMask {
            mask: vec![false; nsamples],
            nsamples: 0,
        }
    }

    /// Sets the observation at the specified index as visible
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    fn mark(&mut self, idx: usize) {
        self.mask[idx] = true;
        self.nsamples += 1;
    }
}

/// Sorted values of observations with indices (always for a particular feature)
struct SortedIndex<'a, F: Float> {
    feature_name: &'a str,
    sorted_values: Vec<(usize, F)>,
}

impl<'a, F: Float> SortedIndex<'a, F> {
    /// Sorts the values of a given feature in ascending order
    ///
    /// ### Returns
    ///
    /// A sorted vector of (index, value) pairs obtained by sorting the observations by
    /// the value of the specified feature.
    fn of_array_column(
        x: &ArrayBase<impl Data<Elem = F>, Ix2>,
        feature_idx: usize,
        feature_name: &'a str,
    ) -> Self {
        let sliced_column: Vec<F> = x.index_axis(Axis(1), feature_idx).to_vec();
        let mut pairs: Vec<(usize, F)> = sliced_column.into_iter().enumerate().collect();
        pairs.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Greater));

        SortedIndex {
            sorted_values: pairs,
            feature_name,
        }
    }
}

/// Everything the recursive node fitting shares
struct FitContext<'a, 'b, F: Float, L, D: Data<Elem = F>, T> {
    data: &'a DatasetBase<ArrayBase<D, Ix2>, T>,
    classes: &'a [L],
    class_idx: Vec<usize>,
    sorted_indices: &'a [SortedIndex<'b, F>],
    params: &'a DecisionTreeValidParams<F, L>,
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone)]
/// A node in the decision tree
///
/// Besides the split, every node keeps the weighted class distribution of the training samples
/// that reached it, in the class ordering of the tree.
pub struct TreeNode<F, L> {
    feature_idx: usize,
    feature_name: String,
    split_value: F,
    impurity: f32,
    impurity_decrease: F,
    nsamples: usize,
    class_distribution: Vec<f32>,
    left_child: Option<Box<TreeNode<F, L>>>,
    right_child: Option<Box<TreeNode<F, L>>>,
    leaf_node: bool,
    prediction: L,
    depth: usize,
}

impl<F, L> Eq for TreeNode<F, L> {}

impl<F, L> PartialEq for TreeNode<F, L> {
    fn eq(&self, other: &Self) -> bool {
        self.feature_idx == other.feature_idx
    }
}

impl<F: Float, L: Label> TreeNode<F, L> {
    fn empty_leaf(
        prediction: L,
        impurity: f32,
        nsamples: usize,
        class_distribution: Vec<f32>,
        depth: usize,
    ) -> Self {
        TreeNode {
            feature_idx: 0,
            feature_name: "".to_string(),
            split_value: F::zero(),
            impurity,
            impurity_decrease: F::zero(),
            nsamples,
            class_distribution,
            left_child: None,
            right_child: None,
            leaf_node: true,
            prediction,
            depth,
        }
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.leaf_node
    }

    /// Returns the depth of the node in the decision tree
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `Some(prediction)` for leaf nodes and `None` for internal nodes.
    pub fn prediction(&self) -> Option<L> {
        if self.is_leaf() {
            Some(self.prediction.clone())
        } else {
            None
        }
    }

    /// Returns the majority class of the samples which reached this node
    pub fn majority_class(&self) -> &L {
        &self.prediction
    }

    /// Returns both children, first left then right
    pub fn children(&self) -> Vec<&Option<Box<TreeNode<F, L>>>> {
        vec![&self.left_child, &self.right_child]
    }

    /// Return the split (feature index, value) and its impurity decrease
    pub fn split(&self) -> (usize, F, F) {
        (self.feature_idx, self.split_value, self.impurity_decrease)
    }

    /// Returns the name of the feature used in the split if the node is internal,
    /// `None` otherwise
    pub fn feature_name(&self) -> Option<&String> {
        if self.leaf_node {
            None
        } else {
            Some(&self.feature_name)
        }
    }

    /// Impurity of the node, measured with the split quality the tree was fit with
    pub fn impurity(&self) -> f32 {
        self.impurity
    }

    /// Number of training samples which reached this node
    pub fn nsamples(&self) -> usize {
        self.nsamples
    }

    /// Weighted number of training samples of every class which reached this node
    pub fn class_distribution(&self) -> &[f32] {
        &self.class_distribution
    }

    /// Recursively fits the node
    fn fit<D: Data<Elem = F>, T: AsTargets<Elem = L>, R: Rng>(
        ctx: &FitContext<F, L, D, T>,
        mask: &RowMask,
        depth: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let params = ctx.params;

        // compute weighted frequencies for target classes in the tree's class order
        let class_freq = ctx.data.label_frequencies_with_mask(&mask.mask);
        let parent_class_freq = ctx
            .classes
            .iter()
            .map(|class| class_freq.get(class).copied().unwrap_or(0.0))
            .collect::<Vec<_>>();

        // set our prediction for this subset to the modal class
        let prediction = ctx.classes[find_modal_class(&parent_class_freq)].clone();
        let parent_score = impurity(params.split_quality(), &parent_class_freq);

        // return empty leaf when we don't have enough samples, the maximal depth is reached or
        // the node is already pure
        if (mask.nsamples as f32) < params.min_weight_split()
            || params
                .max_depth()
                .map(|max_depth| depth >= max_depth)
                .unwrap_or(false)
            || parent_score <= 0.0
        {
            return Ok(Self::empty_leaf(
                prediction,
                parent_score,
                mask.nsamples,
                parent_class_freq,
                depth,
            ));
        }

        let nfeatures = ctx.sorted_indices.len();
        let nconsidered = params.max_features().resolve(nfeatures);
        // features are visited in random order until `nconsidered` of them vary inside this
        // node, constant features do not count towards the limit
        let order = if nconsidered < nfeatures {
            sample(rng, nfeatures, nfeatures).into_vec()
        } else {
            (0..nfeatures).collect()
        };
        let mut considered = 0;

        let total_weight = parent_class_freq.iter().sum::<f32>();

        // Find best split for current level
        let mut best: Option<(usize, F, f32)> = None;

        for feature_idx in order {
            if considered == nconsidered {
                break;
            }

            let sorted_index = &ctx.sorted_indices[feature_idx];
            let visible = sorted_index
                .sorted_values
                .iter()
                .filter(|(idx, _)| mask.mask[*idx])
                .collect::<Vec<_>>();

            let is_constant = match (visible.first(), visible.last()) {
                (Some((_, first)), Some((_, last))) => (*last - *first).abs() < F::cast(1e-5),
                _ => true,
            };
            if is_constant {
                continue;
            }
            considered += 1;

            let mut right_class_freq = parent_class_freq.clone();
            let mut left_class_freq = vec![0.0; parent_class_freq.len()];
            let mut weight_on_right_side = total_weight;
            let mut weight_on_left_side = 0.0;

            // We start by putting all visible observations in the right subtree and then move
            // them (sorted by `feature_idx`) one by one to the left subtree. Every boundary
            // between two distinct values is a candidate split.
            for pair in visible.windows(2) {
                let (presorted_index, value) = *pair[0];
                let next_value = pair[1].1;

                let sample_class = ctx.class_idx[presorted_index];
                let sample_weight = ctx.data.weight_for(presorted_index);

                right_class_freq[sample_class] -= sample_weight;
                weight_on_right_side -= sample_weight;
                left_class_freq[sample_class] += sample_weight;
                weight_on_left_side += sample_weight;

                // Continue if the next value is equal, so that equal values end up in the same subtree
                if (next_value - value).abs() < F::cast(1e-5) {
                    continue;
                }

                // If the split would result in too few samples in a leaf
                // then skip computing the quality
                if weight_on_right_side < params.min_weight_leaf()
                    || weight_on_left_side < params.min_weight_leaf()
                {
                    continue;
                }

                let left_score = impurity(params.split_quality(), &left_class_freq);
                let right_score = impurity(params.split_quality(), &right_class_freq);

                // Weight the qualities based on the number of samples in each subset
                let w = weight_on_left_side / total_weight;
                let score = w * left_score + (1.0 - w) * right_score;

                // Take the midpoint from this value and the next one as split_value
                let split_value = (value + next_value) / F::cast(2.0);

                // override best indices when score improved
                best = match best.take() {
                    None => Some((feature_idx, split_value, score)),
                    Some((_, _, best_score)) if score < best_score => {
                        Some((feature_idx, split_value, score))
                    }
                    x => x,
                };
            }
        }

        // If the best split decreases the impurity by at least the threshold set in the
        // parameters, the split is applied and `fit` is called on both subsets. Otherwise the
        // node becomes a leaf predicting the most common label.
        let (best_feature_idx, best_split_value, impurity_decrease) = match best {
            Some((idx, value, best_score))
                if F::cast(parent_score - best_score) >= params.min_impurity_decrease() =>
            {
                (idx, value, F::cast(parent_score - best_score))
            }
            _ => {
                return Ok(Self::empty_leaf(
                    prediction,
                    parent_score,
                    mask.nsamples,
                    parent_class_freq,
                    depth,
                ))
            }
        };

        // determine new masks for the left and right subtrees
        let nsamples = ctx.data.nsamples();
        let mut left_mask = RowMask::none(nsamples);
        let mut right_mask = RowMask::none(nsamples);

        for i in 0..nsamples {
            if mask.mask[i] {
                if ctx.data.records()[(i, best_feature_idx)] <= best_split_value {
                    left_mask.mark(i);
                } else {
                    right_mask.mark(i);
                }
            }
        }

        if left_mask.nsamples == 0 || right_mask.nsamples == 0 {
            return Ok(Self::empty_leaf(
                prediction,
                parent_score,
                mask.nsamples,
                parent_class_freq,
                depth,
            ));
        }

        let left_child = TreeNode::fit(ctx, &left_mask, depth + 1, rng)?;
        let right_child = TreeNode::fit(ctx, &right_mask, depth + 1, rng)?;

        Ok(TreeNode {
            feature_idx: best_feature_idx,
            feature_name: ctx.sorted_indices[best_feature_idx].feature_name.to_owned(),
            split_value: best_split_value,
            impurity: parent_score,
            impurity_decrease,
            nsamples: mask.nsamples,
            class_distribution: parent_class_freq,
            left_child: Some(Box::new(left_child)),
            right_child: Some(Box::new(right_child)),
            leaf_node: false,
            prediction,
            depth,
        })
    }
}

/// A fitted decision tree model for classification.
///
/// ### Structure
/// A decision tree structure is a binary tree where:
/// * Each internal node specifies a decision, represented by a choice of a feature and a "split value" such that all observations for which
/// `feature <= split_value` is true fall in the left subtree, while the others fall in the right subtree.
///
/// * leaf nodes make predictions, and their prediction is the most popular label in the node
///
/// ### Algorithm
///
/// Starting with a single root node, decision trees are trained recursively by applying the following rule to every
/// node considered:
///
/// * Find the best split value for each candidate feature of the observations belonging in the node;
/// * Select the feature (and its best split value) that maximizes the quality of the split;
/// * If the score of the split is sufficiently larger than the score of the unsplit node, then two child nodes are generated, the left one
///   containing all observations with `feature <= split value` and the right one containing the rest.
/// * If no suitable split is found, the node is marked as leaf and its prediction is set to be the most common label in the node;
///
/// The [quality score](enum.SplitQuality.html) used can be specified in the [parameters](struct.DecisionTreeParams.html).
///
/// ### Predictions
///
/// To predict the label of a sample, the tree is traversed from the root to a leaf, choosing between left and right children according to
/// the values of the features of the sample. The final prediction for the sample is the prediction of the reached leaf.
///
/// ### Class ordering
///
/// The distinct labels of the training set, sorted ascending, form the class ordering of the tree.
/// Class distributions of the nodes are given in that ordering.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone)]
pub struct DecisionTree<F: Float, L: Label> {
    root_node: TreeNode<F, L>,
    num_features: usize,
    classes: Vec<L>,
}

impl<F: Float, L: Label + Default, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<L>>
    for DecisionTree<F, L>
{
    /// Make predictions for each row of a matrix of features `x`.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<L>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );

        for (row, target) in x.rows().into_iter().zip(y.iter_mut()) {
            *target = find_leaf(&row, &self.root_node).prediction.clone();
        }
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<L> {
        Array1::default(x.nrows())
    }
}

impl<F: Float, L: Label, D, T> Fit<ArrayBase<D, Ix2>, T, Error> for DecisionTreeValidParams<F, L>
where
    D: Data<Elem = F>,
    T: AsTargets<Elem = L> + Labels<Elem = L>,
{
    type Object = DecisionTree<F, L>;

    /// Fit a decision tree using `hyperparamters` on the dataset consisting of
    /// a matrix of features `x` and an array of labels `y`.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let x = dataset.records();
        if x.nrows() == 0 {
            return Err(Error::NotEnoughSamples);
        }
        if x.ncols() == 0 {
            return Err(Error::ZeroFeatures);
        }
        if dataset.targets().as_targets().len() != x.nrows() {
            return Err(Error::MismatchedShapes {
                samples: x.nrows(),
                targets: dataset.targets().as_targets().len(),
            });
        }

        let classes = dataset.targets().label_set();
        let class_idx = dataset
            .targets()
            .as_targets()
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or(0))
            .collect();

        let feature_names = dataset.feature_names();
        let sorted_indices: Vec<_> = (0..(x.ncols()))
            .map(|feature_idx| {
                SortedIndex::of_array_column(x, feature_idx, &feature_names[feature_idx])
            })
            .collect();

        let ctx = FitContext {
            data: dataset,
            classes: &classes,
            class_idx,
            sorted_indices: &sorted_indices,
            params: self,
        };

        let mut rng = StdRng::seed_from_u64(self.seed());
        let root_node = TreeNode::fit(&ctx, &RowMask::all(x.nrows()), 0, &mut rng)?;

        Ok(DecisionTree {
            root_node,
            num_features: x.ncols(),
            classes,
        })
    }
}

impl<F: Float, L: Label> DecisionTree<F, L> {
    /// Create a node iterator in pre-order, left subtrees first
    pub fn iter_nodes(&self) -> NodeIter<F, L> {
        // queue of nodes yet to explore
        let queue = vec![&self.root_node];

        NodeIter::new(queue)
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode<F, L> {
        &self.root_node
    }

    /// Return the class ordering of the tree
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    /// Return the number of features the tree was fit with
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Return max depth of the tree
    pub fn max_depth(&self) -> usize {
        self.iter_nodes()
            .fold(0, |max, node| usize::max(max, node.depth))
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_leaf()).count()
    }

    /// Return the leaf reached by a single sample
    pub fn leaf_for(&self, x: &ArrayBase<impl Data<Elem = F>, Ix1>) -> &TreeNode<F, L> {
        find_leaf(x, &self.root_node)
    }

    /// Generates a [`TreeText`](struct.TreeText.html) structure to print the fitted tree as
    /// indented plain text, naming features and classes as seen during fitting.
    pub fn export_to_text(&self) -> TreeText<F, L> {
        TreeText::new(self)
    }
}

/// Descend from `node` to the leaf responsible for sample `x`
fn find_leaf<'a, F: Float, L: Label>(
    x: &ArrayBase<impl Data<Elem = F>, Ix1>,
    node: &'a TreeNode<F, L>,
) -> &'a TreeNode<F, L> {
    let mut node = node;
    loop {
        if node.leaf_node {
            return node;
        }

        let next = if x[node.feature_idx] <= node.split_value {
            &node.left_child
        } else {
            &node.right_child
        };

        match next {
            Some(child) => node = &**child,
            None => return node,
        }
    }
}

/// Finds the most frequent class in a class distribution. Ties go to the class which comes
/// first in the class ordering.
fn find_modal_class(class_freq: &[f32]) -> usize {
    class_freq
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best_idx, best_freq), (idx, freq)| {
            if *freq > best_freq {
                (idx, *freq)
            } else {
                (best_idx, best_freq)
            }
        })
        .0
}

fn impurity(quality: SplitQuality, class_freq: &[f32]) -> f32 {
    match quality {
        SplitQuality::Gini => gini_impurity(class_freq),
        SplitQuality::Entropy => entropy(class_freq),
    }
}

/// Given the class frequencies calculates the gini impurity of the subset.
fn gini_impurity(class_freq: &[f32]) -> f32 {
    let n_samples = class_freq.iter().sum::<f32>();
    if n_samples <= 0.0 {
        return 0.0;
    }

    let purity = class_freq
        .iter()
        .map(|x| x / n_samples)
        .map(|x| x * x)
        .sum::<f32>();

    (1.0 - purity).max(0.0)
}

/// Given the class frequencies calculates the entropy of the subset.
fn entropy(class_freq: &[f32]) -> f32 {
    let n_samples = class_freq.iter().sum::<f32>();
    if n_samples <= 0.0 {
        return 0.0;
    }

    class_freq
        .iter()
        .map(|x| x / n_samples)
        .map(|x| if x > 0.0 { -x * x.log2() } else { 0.0 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use ip4t::{error::Result, metrics::ToConfusionMatrix, Dataset, ParamGuard};
    use ndarray::{array, s, Array, Array1, Array2};
    use rand::rngs::SmallRng;

    use ndarray_rand::{rand::SeedableRng, rand_distr::Uniform, RandomExt};

    use crate::DecisionTree;

    #[test]
    fn modal_class_prefers_first_on_ties() {
        assert_eq!(find_modal_class(&[6.0, 2.0, 0.0]), 0);
        assert_eq!(find_modal_class(&[1.0, 3.0, 3.0]), 1);
    }

    #[test]
    fn gini_impurity_example() {
        // Class 0 occurs 75% of the time
        // Class 1 occurs 25% of the time
        // Class 2 occurs 0% of the time
        // Gini impurity is 1 - 0.75*0.75 - 0.25*0.25 - 0*0 = 0.375
        assert_abs_diff_eq!(gini_impurity(&[6.0, 2.0, 0.0]), 0.375, epsilon = 1e-5);
        assert_abs_diff_eq!(gini_impurity(&[]), 0.0);
    }

    #[test]
    fn entropy_example() {
        // Entropy is -0.75*log2(0.75) - 0.25*log2(0.25) - 0*log2(0) = 0.81127812
        assert_abs_diff_eq!(entropy(&[6.0, 2.0, 0.0]), 0.81127, epsilon = 1e-5);

        // If split is perfect then entropy is zero
        assert_abs_diff_eq!(entropy(&[8.0, 0.0, 0.0]), 0.0, epsilon = 1e-5);
    }

    #[test]
    /// Single feature test
    ///
    /// Generate a dataset where a single feature perfectly correlates
    /// with the target while the remaining features are random
    /// noise and do not add any information.
    fn single_feature_random_noise_binary() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut data = Array::random_using((50, 10), Uniform::new(-4., 4.), &mut rng);
        data.slice_mut(s![.., 8]).assign(
            &(0..50)
                .map(|x| if x < 25 { 0.0 } else { 1.0 })
                .collect::<Array1<_>>(),
        );

        let targets = (0..50).map(|x| x < 25).collect::<Array1<_>>();
        let dataset = Dataset::new(data, targets);

        let model = DecisionTree::params().max_depth(Some(2)).fit(&dataset)?;

        // we should only use feature index 8 here
        assert!(model
            .iter_nodes()
            .filter(|node| !node.is_leaf())
            .all(|node| node.split().0 == 8));
        assert_eq!(model.num_leaves(), 2);

        // check for perfect accuracy
        let cm = model
            .predict(dataset.records())
            .confusion_matrix(&dataset)?;
        assert_abs_diff_eq!(cm.accuracy(), 1.0, epsilon = 1e-15);

        Ok(())
    }

    #[test]
    /// Check that for random data the max depth is used
    fn check_max_depth() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(42);

        // create very sparse data
        let data = Array::random_using((50, 50), Uniform::new(-1., 1.), &mut rng);
        let targets = (0..50).collect::<Array1<usize>>();

        let dataset = Dataset::new(data, targets);

        // check that the provided depth is actually used
        for max_depth in &[1, 5, 10, 20] {
            let model = DecisionTree::params()
                .max_depth(Some(*max_depth))
                .min_impurity_decrease(1e-10f64)
                .min_weight_split(1e-10)
                .fit(&dataset)?;
            assert!(model.max_depth() <= *max_depth);
        }

        Ok(())
    }

    #[test]
    /// Small perfectly separable dataset test
    ///
    /// This dataset of three elements is perfectly using the second feature.
    fn perfectly_separable_small() -> Result<()> {
        let data = array![[1., 2., 3.], [1., 2., 4.], [1., 3., 3.5]];
        let targets = array![0usize, 0, 1];

        let dataset = Dataset::new(data.clone(), targets);
        let model = DecisionTree::params().max_depth(Some(1)).fit(&dataset)?;

        assert_eq!(model.predict(&data), array![0usize, 0, 1]);

        Ok(())
    }

    #[test]
    fn nodes_carry_class_distribution() -> Result<()> {
        let data = array![[0.], [1.], [2.], [10.], [11.]];
        let targets = array!["tidak", "tidak", "tidak", "ya", "ya"];
        let dataset = Dataset::new(data, targets).with_feature_names(vec!["luas"]);

        let model = DecisionTree::params().fit(&dataset)?;
        assert_eq!(model.classes(), &["tidak", "ya"]);

        let root = model.root_node();
        assert!(!root.is_leaf());
        assert_eq!(root.feature_name().map(|x| x.as_str()), Some("luas"));
        assert_eq!(root.nsamples(), 5);
        assert_eq!(root.class_distribution(), &[3.0, 2.0]);
        assert_abs_diff_eq!(root.impurity(), 0.48, epsilon = 1e-6);

        let (_, split_value, _) = root.split();
        assert_abs_diff_eq!(split_value, 6.0);

        let leaf = model.leaf_for(&array![10.5]);
        assert_eq!(leaf.prediction(), Some("ya"));
        assert_eq!(leaf.class_distribution(), &[0.0, 2.0]);
        assert_eq!(model.num_leaves(), 2);

        Ok(())
    }

    #[test]
    fn toy_dataset_with_ties() -> Result<()> {
        let data = array![[1.0], [1.0], [2.0], [2.0], [3.0], [3.0]];
        let targets = array![0usize, 1, 0, 1, 1, 1];
        let dataset = Dataset::new(data.clone(), targets);

        let model = DecisionTree::params().fit(&dataset)?;

        // equal feature values always end in the same leaf
        let pred = model.predict(&data);
        assert_eq!(pred[0], pred[1]);
        assert_eq!(pred[2], pred[3]);
        assert_eq!(pred[4], 1);

        Ok(())
    }

    #[test]
    fn limited_features_still_fit() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(7);
        let data = Array::random_using((60, 9), Uniform::new(0., 1.), &mut rng);
        let targets = (0..60).map(|i| i % 3).collect::<Array1<usize>>();
        let dataset = Dataset::new(data, targets);

        let params = DecisionTree::params()
            .max_features(crate::MaxFeatures::Sqrt)
            .max_depth(Some(3));
        let a = params.fit(&dataset)?;
        let b = params.fit(&dataset)?;

        // same seed, same tree
        assert_eq!(a.export_to_text().to_string(), b.export_to_text().to_string());
        assert!(a.max_depth() <= 3);

        Ok(())
    }

    #[test]
    fn rejects_degenerate_datasets() {
        let params = DecisionTree::<f64, usize>::params().check_unwrap();

        let no_rows = Dataset::new(Array2::<f64>::zeros((0, 2)), Array1::<usize>::zeros(0));
        assert!(matches!(params.fit(&no_rows), Err(Error::NotEnoughSamples)));

        let no_cols = Dataset::new(Array2::<f64>::zeros((3, 0)), array![0usize, 1, 0]);
        assert!(matches!(params.fit(&no_cols), Err(Error::ZeroFeatures)));
    }
}
