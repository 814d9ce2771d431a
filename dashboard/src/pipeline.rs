//! One analysis run: load, describe, split, encode, balance, train and evaluate
//!
//! Every section of the run ends in a [`SectionOutcome`]. Only a dataset which cannot be read at
//! all aborts the run. A missing column skips the sections which need it, and a failure while
//! modeling is reported in the modeling section while the descriptive sections stay intact.
use std::path::PathBuf;

use ip4t::dataset::{stratified_split_indices, Dataset};
use ip4t::metrics::{ClassificationReport, ConfusionMatrix, ToConfusionMatrix};
use ip4t::traits::{Fit, Predict};
use ip4t_datasets::summary::{self, AreaDistribution, ClassShare, NumericSummary, TableInfo};
use ip4t_datasets::{Column, LoadError, LoadReport, Table, Warning};
use ip4t_preprocessing::{FeatureEncoder, FeatureFrame, PreprocessingError, Smote};
use ip4t_trees::RandomForestClassifier;
use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::DashboardConfig;
use crate::session::{Artifacts, Session};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("target column '{0}' is numeric, expected class labels")]
    NumericTarget(String),
    #[error("no row has a value in the target column '{0}'")]
    NoLabelledRows(String),
    #[error(transparent)]
    Preprocessing(#[from] PreprocessingError),
    #[error(transparent)]
    Model(#[from] ip4t::error::Error),
}

/// Result of a single section of the analysis
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutcome<T> {
    Ok(T),
    /// The section could not run, with the reason shown as a warning
    Skipped(String),
    /// The section failed, with the error message
    Failed(String),
}

impl<T> SectionOutcome<T> {
    pub fn ok(&self) -> Option<&T> {
        match self {
            SectionOutcome::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, SectionOutcome::Ok(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, SectionOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SectionOutcome::Failed(_))
    }
}

/// Descriptive sections, available for every readable dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub head: Table,
    pub info: TableInfo,
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<(String, Vec<(String, usize)>)>,
}

/// Training and evaluation of the forest
#[derive(Debug, Clone)]
pub struct Modeling {
    pub run_id: u64,
    /// Original row index of every training row, before oversampling
    pub train_rows: Vec<usize>,
    /// Original row index of every test row
    pub test_rows: Vec<usize>,
    pub feature_names: Vec<String>,
    /// Class distribution of the training rows after oversampling
    pub balanced: Vec<ClassShare>,
    pub confusion: ConfusionMatrix<String>,
    pub report: ClassificationReport<String>,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub dataset_path: PathBuf,
    pub logo_present: bool,
    pub dropped_index: bool,
    pub invalid_area: usize,
    pub warnings: Vec<Warning>,
    pub overview: Overview,
    pub area: SectionOutcome<AreaDistribution>,
    pub target: SectionOutcome<Vec<ClassShare>>,
    pub modeling: SectionOutcome<Modeling>,
}

/// Load the configured dataset and analyze it
///
/// Publishes the trained forest to `session` if modeling succeeds.
#[instrument(skip(config, session), fields(dataset = %config.dataset_path.display()))]
pub fn run_analysis(
    config: &DashboardConfig,
    session: &mut Session,
) -> Result<AnalysisReport, PipelineError> {
    let loaded = ip4t_datasets::load(&config.dataset_path, &config.load_options())?;

    Ok(analyze(loaded, config, session))
}

/// Analyze an already loaded dataset
pub fn analyze(
    loaded: LoadReport,
    config: &DashboardConfig,
    session: &mut Session,
) -> AnalysisReport {
    let run_id = session.start_run();
    let table = &loaded.table;
    info!(run_id, rows = table.nrows(), "analysis started");

    let overview = Overview {
        head: table.head(config.head_rows),
        info: summary::info(table),
        numeric: summary::describe(table),
        categorical: summary::value_counts(table),
    };

    let area = match table.column(&config.area_column) {
        None => skipped(format!("column '{}' not found", config.area_column)),
        Some(_) => {
            match summary::area_distribution(table, &config.area_column, config.histogram_bins) {
                Some(distribution) => SectionOutcome::Ok(distribution),
                None => skipped("area data empty or invalid".to_string()),
            }
        }
    };

    let target = match table.column(&config.target_column) {
        None => skipped(format!("column '{}' not found", config.target_column)),
        Some(_) => match summary::target_distribution(table, &config.target_column) {
            Some(shares) => SectionOutcome::Ok(shares),
            None => skipped(format!(
                "column '{}' holds no class labels",
                config.target_column
            )),
        },
    };

    let modeling = match table.column(&config.target_column) {
        None => skipped(format!("column '{}' not found", config.target_column)),
        Some(_) => match train_and_evaluate(table, config, run_id) {
            Ok((modeling, artifacts)) => {
                session.publish(artifacts);
                SectionOutcome::Ok(modeling)
            }
            Err(err) => {
                warn!(error = %err, "modeling failed");
                SectionOutcome::Failed(err.to_string())
            }
        },
    };

    AnalysisReport {
        dataset_path: config.dataset_path.clone(),
        logo_present: config.logo_path.is_file(),
        dropped_index: loaded.dropped_index,
        invalid_area: loaded.invalid_area,
        warnings: loaded.warnings.clone(),
        overview,
        area,
        target,
        modeling,
    }
}

fn skipped<T>(reason: String) -> SectionOutcome<T> {
    warn!(%reason, "section skipped");
    SectionOutcome::Skipped(reason)
}

/// Split the labelled rows, encode, oversample the training rows, fit and evaluate the forest
#[instrument(skip(table, config))]
fn train_and_evaluate(
    table: &Table,
    config: &DashboardConfig,
    run_id: u64,
) -> Result<(Modeling, Artifacts), PipelineError> {
    let target = &config.target_column;
    let cells = table
        .column(target)
        .and_then(Column::as_categorical)
        .ok_or_else(|| PipelineError::NumericTarget(target.clone()))?;

    // rows without a class label take no part in modeling
    let (positions, labels): (Vec<usize>, Vec<String>) = cells
        .iter()
        .enumerate()
        .filter_map(|(pos, cell)| cell.clone().map(|label| (pos, label)))
        .unzip();
    if positions.is_empty() {
        return Err(PipelineError::NoLabelledRows(target.clone()));
    }

    let frame = feature_frame(table, target, &positions)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let split = stratified_split_indices(&labels, config.test_ratio, &mut rng)?;
    let select_labels = |indices: &[usize]| {
        indices
            .iter()
            .map(|i| labels[*i].clone())
            .collect::<Array1<String>>()
    };
    let (train_labels, test_labels) = (select_labels(&split.train), select_labels(&split.test));
    info!(
        train = split.train.len(),
        test = split.test.len(),
        "split labelled rows"
    );

    let (train_frame, test_frame) = (frame.select(&split.train), frame.select(&split.test));
    let encoded = FeatureEncoder::new().encode_split(&train_frame, &test_frame)?;
    info!(features = encoded.feature_names.len(), "encoded features");

    let train = Dataset::new(encoded.train.clone(), train_labels)
        .with_feature_names(encoded.feature_names.clone());
    let balanced = Smote::params()
        .k_neighbors(config.k_neighbors)
        .seed(config.seed)
        .resample(&train)?;
    info!(rows = balanced.nsamples(), "balanced training rows");

    let forest = RandomForestClassifier::params()
        .n_trees(config.n_trees)
        .max_depth(Some(config.max_depth))
        .seed(config.seed)
        .fit(&balanced)
        .map_err(PipelineError::Model)?;
    info!(trees = forest.trees().len(), "fitted forest");

    let predicted: Array1<String> = forest.predict(&encoded.test);
    let confusion = predicted.confusion_matrix_with_classes(&test_labels, forest.classes())?;
    let report = confusion.report();
    info!(accuracy = report.accuracy, "evaluated forest");

    let modeling = Modeling {
        run_id,
        train_rows: encoded.train_rows.clone(),
        test_rows: encoded.test_rows.clone(),
        feature_names: encoded.feature_names.clone(),
        balanced: summary::class_distribution(balanced.targets().iter().map(|l| l.as_str())),
        confusion,
        report,
    };
    let artifacts = Artifacts {
        feature_matrix: encoded.combined()?,
        feature_names: encoded.feature_names,
        class_labels: forest.classes().to_vec(),
        forest,
        run_id,
    };

    Ok((modeling, artifacts))
}

/// Feature columns of the rows at `positions`, every column except the target
fn feature_frame(
    table: &Table,
    target: &str,
    positions: &[usize],
) -> Result<FeatureFrame<f64>, PipelineError> {
    let mut numeric = Vec::new();
    let mut numeric_names = Vec::new();
    let mut categorical = Vec::new();
    let mut categorical_names = Vec::new();

    for (name, column) in table.columns().filter(|(name, _)| *name != target) {
        match column {
            Column::Numeric(cells) => {
                numeric_names.push(name.to_string());
                numeric.push(cells);
            }
            Column::Categorical(cells) => {
                categorical_names.push(name.to_string());
                categorical.push(cells);
            }
        }
    }

    let nrows = positions.len();
    let frame = FeatureFrame::new(
        positions.iter().map(|p| table.rows()[*p]).collect(),
        Array2::from_shape_fn((nrows, numeric.len()), |(i, j)| numeric[j][positions[i]]),
        numeric_names,
        Array2::from_shape_fn((nrows, categorical.len()), |(i, j)| {
            categorical[j][positions[i]].clone()
        }),
        categorical_names,
    )?;

    Ok(frame)
}
