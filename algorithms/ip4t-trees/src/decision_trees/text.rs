use super::{DecisionTree, TreeNode};
use ip4t::{Float, Label};
use std::fmt;

/// Struct to print a fitted decision tree as indented plain text.
///
/// Every internal node shows its decision `feature <= threshold` together with its impurity, the
/// number of training samples which reached it and their class distribution. The left subtree
/// (decision true) is printed before the right subtree. Leaves show the predicted class.
///
/// Feature and class names default to the ones seen while fitting and can be replaced, for
/// example with the names of an encoded feature matrix.
///
/// ### Usage
///
/// ```rust
/// use ip4t::prelude::*;
/// use ip4t_trees::DecisionTree;
/// use ndarray::array;
///
/// let dataset = Dataset::new(array![[1.], [2.], [8.], [9.]], array!["tidak", "tidak", "ya", "ya"])
///     .with_feature_names(vec!["luas"]);
/// let tree = DecisionTree::params().fit(&dataset).unwrap();
///
/// let text = tree.export_to_text().to_string();
/// assert!(text.contains("luas <= 5.000"));
/// ```
pub struct TreeText<'a, F: Float, L: Label> {
    tree: &'a DecisionTree<F, L>,
    feature_names: Option<Vec<String>>,
    classes: Option<Vec<L>>,
    class_names: Option<Vec<String>>,
    precision: usize,
}

impl<'a, F: Float, L: Label> TreeText<'a, F, L> {
    pub fn new(tree: &'a DecisionTree<F, L>) -> Self {
        TreeText {
            tree,
            feature_names: None,
            classes: None,
            class_names: None,
            precision: 3,
        }
    }

    /// Name features by position instead of using the names seen while fitting
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);

        self
    }

    /// Show class distributions over `classes` instead of the classes seen by this tree
    ///
    /// A tree grown on a bootstrap sample may lack some classes of its forest, those count zero.
    pub fn with_classes(mut self, classes: Vec<L>) -> Self {
        self.classes = Some(classes);

        self
    }

    /// Name classes by position in the class ordering, see [`TreeText::with_classes`]
    pub fn with_class_names(mut self, names: Vec<String>) -> Self {
        self.class_names = Some(names);

        self
    }

    /// The number of decimals printed for thresholds and impurities
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;

        self
    }

    fn feature_name(&self, node: &TreeNode<F, L>) -> String {
        let (idx, _, _) = node.split();
        self.feature_names
            .as_ref()
            .and_then(|names| names.get(idx).cloned())
            .or_else(|| node.feature_name().cloned())
            .unwrap_or_else(|| format!("feature-{}", idx))
    }

    fn classes(&self) -> &[L] {
        self.classes.as_deref().unwrap_or_else(|| self.tree.classes())
    }

    fn class_name(&self, label: &L) -> String {
        let position = self.classes().iter().position(|c| c == label);
        position
            .and_then(|idx| self.class_names.as_ref().and_then(|names| names.get(idx)))
            .cloned()
            .unwrap_or_else(|| format!("{:?}", label))
    }

    fn format_distribution(&self, node: &TreeNode<F, L>) -> String {
        let entries = self
            .classes()
            .iter()
            .map(|class| {
                let count = self
                    .tree
                    .classes()
                    .iter()
                    .position(|c| c == class)
                    .and_then(|idx| node.class_distribution().get(idx))
                    .copied()
                    .unwrap_or(0.0);
                format!("{}: {}", self.class_name(class), count)
            })
            .collect::<Vec<_>>();

        format!("[{}]", entries.join(", "))
    }

    fn format_node(&self, node: &TreeNode<F, L>, out: &mut String) {
        let indent = "|   ".repeat(node.depth());
        let prec = self.precision;

        if let Some(prediction) = node.prediction() {
            out.push_str(&format!(
                "{}class: {} (gini = {:.prec$}, samples = {}, value = {})\n",
                indent,
                self.class_name(&prediction),
                node.impurity(),
                node.nsamples(),
                self.format_distribution(node),
                prec = prec
            ));
        } else {
            let (_, value, _) = node.split();
            out.push_str(&format!(
                "{}{} <= {:.prec$} (gini = {:.prec$}, samples = {}, value = {})\n",
                indent,
                self.feature_name(node),
                value,
                node.impurity(),
                node.nsamples(),
                self.format_distribution(node),
                prec = prec
            ));
            for child in node.children().into_iter().filter_map(|x| x.as_ref()) {
                self.format_node(child, out);
            }
        }
    }
}

impl<'a, F: Float, L: Label> fmt::Display for TreeText<'a, F, L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut out = String::new();
        self.format_node(self.tree.root_node(), &mut out);

        write!(f, "{}", out)
    }
}
