//! Reading the semicolon separated program dataset
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info, warn};

use crate::error::{LoadError, Result};
use crate::schema::{ColumnKind, Schema};
use crate::table::{Column, Table};

/// Column roles and declared kinds used while loading
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Row number column, dropped when present
    pub index_column: String,
    pub area_column: String,
    pub target_column: String,
    pub schema: Schema,
}

impl Default for LoadOptions {
    fn default() -> LoadOptions {
        LoadOptions {
            index_column: "NO".to_string(),
            area_column: "Luas  m2".to_string(),
            target_column: "POTENSI TOL".to_string(),
            schema: Schema::default(),
        }
    }
}

/// Problems which do not prevent loading but disable parts of the analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An expected or declared column is not part of the file
    MissingColumn { column: String },
    /// Cells of a numeric column which could not be parsed and are treated as missing
    InvalidNumeric { column: String, count: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::MissingColumn { column } => write!(f, "column '{}' not found", column),
            Warning::InvalidNumeric { column, count } => write!(
                f,
                "{} cells of column '{}' are not numbers and count as missing",
                count, column
            ),
        }
    }
}

/// A loaded table and what happened while loading it
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub table: Table,
    /// Whether the index column was present and dropped
    pub dropped_index: bool,
    /// Area cells which are not numbers
    pub invalid_area: usize,
    pub warnings: Vec<Warning>,
}

impl LoadReport {
    /// Whether a column was reported missing
    pub fn is_missing(&self, column: &str) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, Warning::MissingColumn { column: c } if c == column))
    }
}

/// Load the dataset at `path`
pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<LoadReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), "loading dataset");
    load_from_reader(file, options)
}

/// Load the dataset from any reader
///
/// The first record is the header. Fields are separated by `;` and trimmed, an empty field is a
/// missing cell. A record shorter than the header is padded with missing cells, a longer one is
/// rejected.
pub fn load_from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<LoadReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b';')
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut raw = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(LoadError::RowLength {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: headers.len() as u64,
                found: record.len() as u64,
            });
        }
        for (idx, cells) in raw.iter_mut().enumerate() {
            let field = record.get(idx).filter(|f| !f.is_empty());
            cells.push(field.map(str::to_string));
        }
    }
    let nrows = raw.first().map(|c| c.len()).unwrap_or(0);

    let mut warnings = Vec::new();
    let mut invalid_area = 0;
    let mut dropped_index = false;
    let mut columns = Vec::with_capacity(headers.len());

    for (name, cells) in headers.iter().zip(raw) {
        if name == options.index_column {
            dropped_index = true;
            continue;
        }

        let kind = if name == options.area_column {
            ColumnKind::Numeric
        } else {
            options
                .schema
                .kind_of(name)
                .unwrap_or_else(|| Schema::infer(&cells))
        };

        let column = match kind {
            ColumnKind::Numeric => {
                let values = cells
                    .iter()
                    .map(|c| c.as_deref().map(Schema::parse_numeric))
                    .collect::<Vec<_>>();
                let invalid = values.iter().filter(|v| matches!(v, Some(None))).count();
                if invalid > 0 {
                    warn!(column = name, invalid, "coerced unparseable cells to missing");
                    warnings.push(Warning::InvalidNumeric {
                        column: name.to_string(),
                        count: invalid,
                    });
                }
                if name == options.area_column {
                    invalid_area = invalid;
                }

                Column::Numeric(values.into_iter().map(|v| v.flatten()).collect())
            }
            ColumnKind::Categorical => Column::Categorical(cells),
        };
        debug!(column = name, kind = %column.kind(), "typed column");
        columns.push((name.to_string(), column));
    }

    let mut expected = options
        .schema
        .columns()
        .map(|c| c.to_string())
        .collect::<Vec<_>>();
    expected.extend(vec![
        options.area_column.clone(),
        options.target_column.clone(),
    ]);
    expected.sort();
    expected.dedup();
    for column in expected {
        if !headers.iter().any(|h| h == column) {
            warn!(column = %column, "expected column not found");
            warnings.push(Warning::MissingColumn { column });
        }
    }

    let table = Table::new((0..nrows).collect(), columns)?;
    info!(
        rows = table.nrows(),
        columns = table.ncols(),
        dropped_index,
        "loaded dataset"
    );

    Ok(LoadReport {
        table,
        dropped_index,
        invalid_area,
        warnings,
    })
}
