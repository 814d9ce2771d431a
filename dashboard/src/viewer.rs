//! Text rendering of single member trees of the published forest
use thiserror::Error;

use crate::session::{Artifacts, Session};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("model not available, run the analysis first")]
    ModelNotAvailable,
    #[error("tree {index} does not exist, choose a tree between 1 and {n_trees}")]
    IndexOutOfRange { index: usize, n_trees: usize },
    #[error(
        "published model is inconsistent: {names} feature names, {columns} matrix columns, \
         forest trained on {trained} features"
    )]
    InconsistentArtifacts {
        names: usize,
        columns: usize,
        trained: usize,
    },
}

fn check_consistent(artifacts: &Artifacts) -> Result<(), ViewError> {
    let names = artifacts.feature_names.len();
    let columns = artifacts.feature_matrix.ncols();
    let trained = artifacts.forest.num_features();
    if names != columns || columns != trained {
        return Err(ViewError::InconsistentArtifacts {
            names,
            columns,
            trained,
        });
    }

    Ok(())
}

/// Render tree `index` of the published forest, counting from one
///
/// Features are named after the encoded columns of the run that produced the forest. Class
/// distributions are shown over all classes of the forest, also for trees whose bootstrap sample
/// lacked a class.
pub fn show_tree(session: &Session, index: usize) -> Result<String, ViewError> {
    let artifacts = session.artifacts().ok_or(ViewError::ModelNotAvailable)?;
    let trees = artifacts.forest.trees();
    if index == 0 || index > trees.len() {
        return Err(ViewError::IndexOutOfRange {
            index,
            n_trees: trees.len(),
        });
    }
    check_consistent(artifacts)?;

    let text = trees[index - 1]
        .export_to_text()
        .with_feature_names(artifacts.feature_names.clone())
        .with_classes(artifacts.class_labels.clone())
        .with_class_names(artifacts.class_labels.clone());

    Ok(format!(
        "Decision tree {} of {} (run {})\n{}",
        index,
        trees.len(),
        artifacts.run_id,
        text
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ip4t::prelude::*;
    use ip4t_trees::RandomForestClassifier;
    use ndarray::{Array1, Array2};

    fn artifacts() -> Artifacts {
        let records = Array2::from_shape_fn((12, 2), |(i, j)| (i * (j + 1)) as f64);
        let targets = (0..12)
            .map(|i| if i < 9 { "TIDAK" } else { "YA" }.to_string())
            .collect::<Array1<_>>();
        let dataset = Dataset::new(records.clone(), targets);
        let forest = RandomForestClassifier::params()
            .n_trees(20)
            .fit(&dataset)
            .unwrap();

        Artifacts {
            class_labels: forest.classes().to_vec(),
            forest,
            feature_matrix: records,
            feature_names: vec!["Luas  m2".to_string(), "KABUPATEN_BOGOR".to_string()],
            run_id: 1,
        }
    }

    #[test]
    fn every_tree_shows_all_forest_classes() {
        let mut session = Session::new();
        session.publish(artifacts());

        for index in 1..=20 {
            let text = show_tree(&session, index).unwrap();
            let root = text.lines().nth(1).unwrap();
            assert!(root.contains("TIDAK: "), "{}", root);
            assert!(root.contains("YA: "), "{}", root);
        }
    }

    #[test]
    fn inconsistent_artifacts_are_not_rendered() {
        let mut broken = artifacts();
        broken.feature_names.pop();
        let mut session = Session::new();
        session.publish(broken);

        assert_eq!(
            show_tree(&session, 1),
            Err(ViewError::InconsistentArtifacts {
                names: 1,
                columns: 2,
                trained: 2
            })
        );
    }
}
