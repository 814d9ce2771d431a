//! Common metrics for performance evaluation of classifier
//!
//! Scoring is essential for classification tasks. This module implements the confusion matrix
//! and the classification report derived from it: per-class precision, recall, f1-score and
//! support, together with the accuracy and the macro and weighted averages.
use std::collections::HashMap;
use std::fmt;

use ndarray::prelude::*;
use ndarray::Data;

use crate::dataset::{AsTargets, Label};
use crate::error::{Error, Result};

/// Return tuple of class index for each element of prediction and ground_truth
fn map_prediction_to_idx<L: Label>(
    prediction: &[L],
    ground_truth: &[L],
    classes: &[L],
) -> Vec<Option<(usize, usize)>> {
    // create a map from class label to index
    let set = classes
        .iter()
        .enumerate()
        .map(|(a, b)| (b, a))
        .collect::<HashMap<_, usize>>();

    // indices for every prediction
    ground_truth
        .iter()
        .zip(prediction.iter())
        .map(|(a, b)| set.get(&a).and_then(|x| set.get(&b).map(|y| (*x, *y))))
        .collect::<Vec<Option<_>>>()
}

/// Confusion matrix for multi-label evaluation
///
/// A confusion matrix shows predictions in a matrix, where rows correspond to target and columns
/// to predicted. The diagonal entries are correct predictions.
#[derive(Clone, PartialEq)]
pub struct ConfusionMatrix<A> {
    matrix: Array2<usize>,
    members: Array1<A>,
}

impl<A> ConfusionMatrix<A> {
    /// Returns the raw counts, rows are true classes and columns predicted classes
    pub fn matrix(&self) -> &Array2<usize> {
        &self.matrix
    }

    /// Returns the class ordering of rows and columns
    pub fn members(&self) -> &Array1<A> {
        &self.members
    }

    /// Number of observations of each true class
    pub fn support(&self) -> Array1<usize> {
        self.matrix.sum_axis(Axis(1))
    }

    /// Calculate precision for every class
    ///
    /// Precision is `TP / (TP + FP)`, classes which were never predicted get a precision of zero.
    pub fn precision(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(0));

        self.matrix
            .diag()
            .iter()
            .zip(sum.iter())
            .map(|(a, b)| safe_ratio(*a, *b))
            .collect()
    }

    /// Calculate recall for every class
    ///
    /// Recall is `TP / (TP + FN)`, classes without any observation get a recall of zero.
    pub fn recall(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(1));

        self.matrix
            .diag()
            .iter()
            .zip(sum.iter())
            .map(|(a, b)| safe_ratio(*a, *b))
            .collect()
    }

    /// Return mean accuracy
    pub fn accuracy(&self) -> f32 {
        safe_ratio(self.matrix.diag().sum(), self.matrix.sum())
    }

    /// Return beta score for every class
    pub fn f_score(&self, beta: f32) -> Array1<f32> {
        let sb = beta * beta;
        let precision = self.precision();
        let recall = self.recall();

        precision
            .iter()
            .zip(recall.iter())
            .map(|(p, r)| {
                let denom = sb * p + r;
                if denom > 0.0 {
                    (1.0 + sb) * (p * r) / denom
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Return beta=1 score for every class
    pub fn f1_score(&self) -> Array1<f32> {
        self.f_score(1.0)
    }
}

impl<A: Clone> ConfusionMatrix<A> {
    /// Derive the classification report
    pub fn report(&self) -> ClassificationReport<A> {
        ClassificationReport::from(self)
    }
}

fn safe_ratio(num: usize, denom: usize) -> f32 {
    if denom == 0 {
        0.0
    } else {
        num as f32 / denom as f32
    }
}

/// Print a confusion matrix
impl<A: fmt::Display> fmt::Display for ConfusionMatrix<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self
            .members
            .iter()
            .map(|m| m.to_string().len())
            .chain(self.matrix.iter().map(|v| v.to_string().len()))
            .max()
            .unwrap_or(1)
            .max(6);

        write!(f, "{:>width$} |", "actual", width = width)?;
        for member in self.members.iter() {
            write!(f, " {:>width$}", member.to_string(), width = width)?;
        }
        writeln!(f)?;

        for (member, row) in self.members.iter().zip(self.matrix.outer_iter()) {
            write!(f, "{:>width$} |", member.to_string(), width = width)?;
            for val in row.iter() {
                write!(f, " {:>width$}", val, width = width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl<A: fmt::Debug> fmt::Debug for ConfusionMatrix<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ConfusionMatrix")
            .field("members", &self.members)
            .field("matrix", &self.matrix)
            .finish()
    }
}

/// Classification functions
///
/// Contains only routine for Confusion Matrix, as all other current metrics can be derived from
/// the entries in the matrix. The ground truth may be any target container, a dataset included.
pub trait ToConfusionMatrix<A, T> {
    /// Compute the confusion matrix with the classes found in prediction and ground truth,
    /// in ascending order
    fn confusion_matrix(&self, ground_truth: T) -> Result<ConfusionMatrix<A>>;

    /// Compute the confusion matrix with a fixed class ordering
    ///
    /// Observations whose true or predicted label is not part of `classes` are not counted.
    fn confusion_matrix_with_classes(
        &self,
        ground_truth: T,
        classes: &[A],
    ) -> Result<ConfusionMatrix<A>>;
}

impl<L: Label, S: Data<Elem = L>, T: AsTargets<Elem = L>> ToConfusionMatrix<L, T>
    for ArrayBase<S, Ix1>
{
    fn confusion_matrix(&self, ground_truth: T) -> Result<ConfusionMatrix<L>> {
        let mut classes = ground_truth
            .as_targets()
            .iter()
            .chain(self.iter())
            .cloned()
            .collect::<Vec<_>>();
        // create a set
        classes.sort();
        classes.dedup();

        self.confusion_matrix_with_classes(ground_truth, &classes)
    }

    fn confusion_matrix_with_classes(
        &self,
        ground_truth: T,
        classes: &[L],
    ) -> Result<ConfusionMatrix<L>> {
        let ground_truth = ground_truth.as_targets();
        if ground_truth.len() != self.len() {
            return Err(Error::MismatchedPrediction {
                predicted: self.len(),
                truth: ground_truth.len(),
            });
        }

        let prediction = self.to_vec();
        let ground_truth = ground_truth.to_vec();

        // find indices to labels
        let indices = map_prediction_to_idx(&prediction, &ground_truth, classes);

        // count each index tuple in the confusion matrix
        let mut confusion_matrix = Array2::zeros((classes.len(), classes.len()));
        for (i1, i2) in indices.into_iter().flatten() {
            confusion_matrix[(i1, i2)] += 1;
        }

        Ok(ConfusionMatrix {
            matrix: confusion_matrix,
            members: Array1::from(classes.to_vec()),
        })
    }
}

/// Precision, recall, f1-score and support of a single class (or an average of classes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    pub support: usize,
}

/// Classification report
///
/// Per-class metrics in the class ordering of the confusion matrix, followed by the accuracy,
/// the unweighted mean over classes (macro average) and the support-weighted mean (weighted
/// average).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport<A> {
    pub classes: Vec<(A, ClassMetrics)>,
    pub accuracy: f32,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

impl<A: Clone> From<&ConfusionMatrix<A>> for ClassificationReport<A> {
    fn from(cm: &ConfusionMatrix<A>) -> Self {
        let precision = cm.precision();
        let recall = cm.recall();
        let f1 = cm.f1_score();
        let support = cm.support();

        let classes = cm
            .members
            .iter()
            .enumerate()
            .map(|(i, member)| {
                (
                    member.clone(),
                    ClassMetrics {
                        precision: precision[i],
                        recall: recall[i],
                        f1: f1[i],
                        support: support[i],
                    },
                )
            })
            .collect::<Vec<_>>();

        let total = support.sum();
        let nclasses = classes.len().max(1) as f32;
        let mean = |f: fn(&ClassMetrics) -> f32| {
            classes.iter().map(|(_, m)| f(m)).sum::<f32>() / nclasses
        };
        let weighted = |f: fn(&ClassMetrics) -> f32| {
            if total == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|(_, m)| f(m) * m.support as f32)
                    .sum::<f32>()
                    / total as f32
            }
        };

        let macro_avg = ClassMetrics {
            precision: mean(|m| m.precision),
            recall: mean(|m| m.recall),
            f1: mean(|m| m.f1),
            support: total,
        };
        let weighted_avg = ClassMetrics {
            precision: weighted(|m| m.precision),
            recall: weighted(|m| m.recall),
            f1: weighted(|m| m.f1),
            support: total,
        };

        ClassificationReport {
            classes,
            accuracy: cm.accuracy(),
            macro_avg,
            weighted_avg,
        }
    }
}

impl<A: fmt::Display> fmt::Display for ClassificationReport<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|(c, _)| c.to_string().len())
            .max()
            .unwrap_or(0)
            .max(12);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "",
            "precision",
            "recall",
            "f1-score",
            "support",
            width = width
        )?;

        let row = |f: &mut fmt::Formatter, name: &str, m: &ClassMetrics| {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name,
                m.precision,
                m.recall,
                m.f1,
                m.support,
                width = width
            )
        };

        for (class, metrics) in &self.classes {
            row(f, &class.to_string(), metrics)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.macro_avg.support,
            width = width
        )?;
        row(f, "macro avg", &self.macro_avg)?;
        row(f, "weighted avg", &self.weighted_avg)
    }
}

#[cfg(test)]
mod tests {
    use super::{ClassMetrics, ToConfusionMatrix};
    use approx::assert_abs_diff_eq;
    use ndarray::{array, ArrayView1};

    #[test]
    fn test_confusion_matrix() {
        let predicted = ArrayView1::from(&[0usize, 1, 0, 1, 0, 1]);
        let ground_truth = ArrayView1::from(&[1usize, 1, 0, 1, 0, 1]);

        let cm = predicted.confusion_matrix(ground_truth).unwrap();

        assert_eq!(cm.matrix(), &array![[2usize, 0], [1, 3]]);
        assert_eq!(cm.members(), &array![0usize, 1]);
    }

    #[test]
    fn test_cm_metrics() {
        let predicted = array![0usize, 1, 0, 1, 0, 1];
        let ground_truth = array![1usize, 1, 0, 1, 0, 1];

        let x = predicted.confusion_matrix(&ground_truth).unwrap();

        assert_abs_diff_eq!(x.accuracy(), 5.0 / 6.0);
        assert_abs_diff_eq!(x.precision(), array![2.0f32 / 3.0, 1.0]);
        assert_abs_diff_eq!(x.recall(), array![1.0f32, 3.0 / 4.0]);
        assert_abs_diff_eq!(x.f1_score(), array![4.0f32 / 5.0, 6.0 / 7.0], epsilon = 1e-6);
        assert_eq!(x.support(), array![2usize, 4]);
    }

    #[test]
    fn fixed_class_order_is_kept() {
        let predicted = array!["ya", "tidak", "ya"];
        let ground_truth = array!["ya", "ya", "tidak"];

        let cm = predicted
            .confusion_matrix_with_classes(&ground_truth, &["ya", "tidak", "mungkin"])
            .unwrap();

        assert_eq!(cm.members(), &array!["ya", "tidak", "mungkin"]);
        assert_eq!(cm.matrix(), &array![[1usize, 1, 0], [1, 0, 0], [0, 0, 0]]);
        // class never predicted nor observed
        assert_eq!(cm.precision()[2], 0.0);
        assert_eq!(cm.recall()[2], 0.0);
        assert_eq!(cm.f1_score()[2], 0.0);
    }

    #[test]
    fn rows_sum_to_support_and_accuracy_is_trace() {
        let predicted = array![0usize, 3, 2, 0, 1, 1, 1, 3, 2, 3];
        let ground_truth = array![0usize, 2, 3, 0, 1, 2, 1, 2, 3, 2];

        let cm = predicted.confusion_matrix(&ground_truth).unwrap();
        assert_eq!(cm.support(), array![2usize, 2, 4, 2]);

        let report = cm.report();
        let trace = cm.matrix().diag().sum() as f32;
        let total = cm.matrix().sum() as f32;
        assert_abs_diff_eq!(report.accuracy, trace / total);
        assert_eq!(report.weighted_avg.support, 10);
    }

    #[test]
    fn report_averages() {
        let predicted = array!["a", "a", "b", "b"];
        let ground_truth = array!["a", "b", "b", "b"];

        let report = predicted.confusion_matrix(&ground_truth).unwrap().report();

        assert_eq!(report.classes[0].0, "a");
        assert_eq!(
            report.classes[0].1,
            ClassMetrics {
                precision: 0.5,
                recall: 1.0,
                f1: 2.0 / 3.0,
                support: 1
            }
        );
        assert_abs_diff_eq!(report.accuracy, 0.75);
        assert_abs_diff_eq!(report.macro_avg.precision, 0.75);
        assert_abs_diff_eq!(report.macro_avg.recall, (1.0 + 2.0 / 3.0) / 2.0);
        assert_abs_diff_eq!(
            report.weighted_avg.recall,
            (1.0 + 3.0 * 2.0 / 3.0) / 4.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let predicted = array![0usize, 1];
        let ground_truth = array![0usize, 1, 1];

        assert!(predicted.confusion_matrix(&ground_truth).is_err());
    }
}
