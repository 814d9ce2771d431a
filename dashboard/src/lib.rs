//! `ip4t-dashboard` runs the IP4T toll road potential analysis behind a terminal front end.
//!
//! A run loads the configured dataset, renders its descriptive sections and trains a random
//! forest on the `POTENSI TOL` label. Training rows are one-hot encoded and balanced with SMOTE
//! first, the held-out rows are used for the confusion matrix and the classification report.
//! The forest of the latest successful run stays in the [`Session`] so single member trees can be
//! rendered afterwards.
//!
//! ```ignore
//! let config = DashboardConfig::load()?;
//! let mut session = Session::new();
//!
//! let report = run_analysis(&config, &mut session)?;
//! println!("{}", report);
//! println!("{}", show_tree(&session, 1)?);
//! ```

pub mod command;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod viewer;

pub use command::Command;
pub use config::{ConfigError, DashboardConfig};
pub use pipeline::{analyze, run_analysis, AnalysisReport, PipelineError, SectionOutcome};
pub use session::{Artifacts, Session};
pub use viewer::{show_tree, ViewError};
