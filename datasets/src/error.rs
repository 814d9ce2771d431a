use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors which prevent a dataset from being read
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("the dataset has no header row")]
    Empty,
    #[error("line {line} has {found} fields, the header has {expected}")]
    RowLength {
        line: u64,
        expected: u64,
        found: u64,
    },
    #[error("column {column} has {found} cells, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("malformed csv at byte {offset}: {source}")]
    Parse { offset: u64, source: csv::Error },
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> LoadError {
        if let csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } = err.kind()
        {
            return LoadError::RowLength {
                line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
                expected: *expected_len,
                found: *len,
            };
        }

        LoadError::Parse {
            offset: err.position().map(|p| p.byte()).unwrap_or(0),
            source: err,
        }
    }
}
