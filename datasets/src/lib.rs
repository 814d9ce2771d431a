//! `ip4t-datasets` reads the IP4T program dataset and computes its descriptive statistics.
//!
//! ## The Big Picture
//!
//! The dataset is a semicolon separated file with one row per land parcel. It carries an optional
//! row number column `NO`, the parcel area `Luas  m2`, the toll road potential `POTENSI TOL` and
//! any number of further numeric or categorical columns.
//!
//! Loading produces a typed [`Table`] together with a [`LoadReport`] listing what had to be
//! repaired or is missing. Missing columns are never an error, they only disable the parts of the
//! analysis which depend on them.
//!
//! ## Using the loader
//!
//! ```ignore
//! let report = ip4t_datasets::load("dataset28052025.csv", &LoadOptions::default())?;
//! let summaries = ip4t_datasets::summary::describe(&report.table);
//! ```

mod error;
mod loader;
pub mod schema;
pub mod summary;
mod table;

pub use error::{LoadError, Result};
pub use loader::{load, load_from_reader, LoadOptions, LoadReport, Warning};
pub use schema::{ColumnKind, Schema};
pub use table::{Column, Table};
