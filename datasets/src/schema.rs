//! Column typing
//!
//! Columns named in a [`Schema`] get the declared kind. All other columns are inferred from their
//! cells: a column is numeric when it has at least one cell and every cell parses as a number.
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Declared column kinds, keyed by column name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(BTreeMap<String, ColumnKind>);

impl Schema {
    pub fn new() -> Schema {
        Schema(BTreeMap::new())
    }

    /// Declare the kind of a column
    pub fn with(mut self, column: impl Into<String>, kind: ColumnKind) -> Schema {
        self.0.insert(column.into(), kind);
        self
    }

    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.0.get(column).copied()
    }

    /// Declared column names, sorted
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    /// Parse a numeric cell, non-finite values count as unparseable
    pub fn parse_numeric(cell: &str) -> Option<f64> {
        cell.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Kind of an undeclared column with the given cells
    pub fn infer(cells: &[Option<String>]) -> ColumnKind {
        let mut present = cells.iter().flatten().peekable();
        if present.peek().is_none() {
            return ColumnKind::Categorical;
        }

        if present.all(|c| Schema::parse_numeric(c).is_some()) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }
}

/// `Luas  m2` is numeric and `POTENSI TOL` categorical
impl Default for Schema {
    fn default() -> Schema {
        Schema::new()
            .with("Luas  m2", ColumnKind::Numeric)
            .with("POTENSI TOL", ColumnKind::Categorical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| Some(v.to_string()).filter(|v| !v.is_empty()))
            .collect()
    }

    #[test]
    fn infers_numeric_columns() {
        assert_eq!(Schema::infer(&cells(&["1", "2.5", ""])), ColumnKind::Numeric);
        assert_eq!(Schema::infer(&cells(&["1", "dua"])), ColumnKind::Categorical);
        assert_eq!(Schema::infer(&cells(&["", ""])), ColumnKind::Categorical);
        assert_eq!(Schema::infer(&cells(&["inf"])), ColumnKind::Categorical);
    }

    #[test]
    fn default_schema_declares_area_and_target() {
        let schema = Schema::default();

        assert_eq!(schema.kind_of("Luas  m2"), Some(ColumnKind::Numeric));
        assert_eq!(schema.kind_of("POTENSI TOL"), Some(ColumnKind::Categorical));
        assert_eq!(schema.kind_of("KABUPATEN"), None);
        assert_eq!(
            schema.columns().collect::<Vec<_>>(),
            vec!["Luas  m2", "POTENSI TOL"]
        );
    }
}
