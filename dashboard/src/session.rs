//! Artifacts shared between the analysis and the tree viewer
use ip4t_trees::RandomForestClassifier;
use ndarray::Array2;

/// Everything the tree viewer needs from a successful run
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub forest: RandomForestClassifier<f64, String>,
    /// Encoded training rows followed by the encoded test rows
    pub feature_matrix: Array2<f64>,
    pub feature_names: Vec<String>,
    /// Class ordering of the forest
    pub class_labels: Vec<String>,
    /// Number of the run which produced the artifacts, starting at one
    pub run_id: u64,
}

/// Store of the most recent artifacts
///
/// A successful run replaces the artifacts as a whole, a failed run leaves them alone.
#[derive(Debug, Default)]
pub struct Session {
    artifacts: Option<Artifacts>,
    runs: u64,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn artifacts(&self) -> Option<&Artifacts> {
        self.artifacts.as_ref()
    }

    /// Number of runs started in this session
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Count a new run and return its id
    pub(crate) fn start_run(&mut self) -> u64 {
        self.runs += 1;
        self.runs
    }

    pub(crate) fn publish(&mut self, artifacts: Artifacts) {
        self.artifacts = Some(artifacts);
    }

    /// Forget the artifacts
    pub fn clear(&mut self) {
        self.artifacts = None;
    }
}
