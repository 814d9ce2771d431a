//! Column-major in-memory table
use std::fmt;

use crate::error::{LoadError, Result};
use crate::schema::ColumnKind;

/// A typed column, every cell may be missing
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Numeric(_) => ColumnKind::Numeric,
            Column::Categorical(_) => ColumnKind::Categorical,
        }
    }

    /// Number of cells which are not missing
    pub fn non_null(&self) -> usize {
        match self {
            Column::Numeric(values) => values.iter().filter(|v| v.is_some()).count(),
            Column::Categorical(values) => values.iter().filter(|v| v.is_some()).count(),
        }
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match self {
            Column::Numeric(values) => Some(values),
            Column::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&[Option<String>]> {
        match self {
            Column::Categorical(values) => Some(values),
            Column::Numeric(_) => None,
        }
    }

    /// Select cells by position
    pub fn select(&self, positions: &[usize]) -> Column {
        match self {
            Column::Numeric(values) => {
                Column::Numeric(positions.iter().map(|p| values[*p]).collect())
            }
            Column::Categorical(values) => {
                Column::Categorical(positions.iter().map(|p| values[*p].clone()).collect())
            }
        }
    }

    /// Text of a single cell, `NaN` for a missing cell
    pub fn display_cell(&self, idx: usize) -> String {
        match self {
            Column::Numeric(values) => values[idx]
                .map(|v| v.to_string())
                .unwrap_or_else(|| "NaN".to_string()),
            Column::Categorical(values) => values[idx]
                .clone()
                .unwrap_or_else(|| "NaN".to_string()),
        }
    }
}

/// Named columns of equal length
///
/// Every row remembers its position in the source file, so rows keep their identity through
/// filtering and partitioning.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    rows: Vec<usize>,
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Create a table, every column has to hold one cell per row
    pub fn new(rows: Vec<usize>, columns: Vec<(String, Column)>) -> Result<Table> {
        for (name, column) in &columns {
            if column.len() != rows.len() {
                return Err(LoadError::ColumnLength {
                    column: name.clone(),
                    expected: rows.len(),
                    found: column.len(),
                });
            }
        }
        let (names, columns) = columns.into_iter().unzip();

        Ok(Table {
            rows,
            names,
            columns,
        })
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Original row index of every row
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
    }

    /// Iterate over `(name, column)` pairs in table order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names
            .iter()
            .map(|n| n.as_str())
            .zip(self.columns.iter())
    }

    /// Remove a column, returning it if it existed
    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.names.iter().position(|n| n == name)?;
        self.names.remove(idx);

        Some(self.columns.remove(idx))
    }

    /// Select rows by position, keeping their original row index
    pub fn select_rows(&self, positions: &[usize]) -> Table {
        Table {
            rows: positions.iter().map(|p| self.rows[*p]).collect(),
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select(positions)).collect(),
        }
    }

    /// The first `n` rows
    pub fn head(&self, n: usize) -> Table {
        let positions = (0..n.min(self.nrows())).collect::<Vec<_>>();
        self.select_rows(&positions)
    }
}

/// Render the table as aligned text, the original row index in front
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cells = (0..self.nrows())
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.display_cell(row))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let widths = self
            .names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                cells
                    .iter()
                    .map(|row| row[idx].chars().count())
                    .chain(Some(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect::<Vec<_>>();
        let index_width = self
            .rows
            .iter()
            .map(|r| r.to_string().len())
            .max()
            .unwrap_or(1);

        write!(f, "{:>width$}", "", width = index_width)?;
        for (name, width) in self.names.iter().zip(&widths) {
            write!(f, "  {:>width$}", name, width = width)?;
        }
        writeln!(f)?;

        for (row, values) in self.rows.iter().zip(&cells) {
            write!(f, "{:>width$}", row, width = index_width)?;
            for (value, width) in values.iter().zip(&widths) {
                write!(f, "  {:>width$}", value, width = width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(
            vec![0, 1, 2],
            vec![
                (
                    "Luas  m2".to_string(),
                    Column::Numeric(vec![Some(120.), None, Some(80.5)]),
                ),
                (
                    "POTENSI TOL".to_string(),
                    Column::Categorical(vec![
                        Some("YA".to_string()),
                        Some("TIDAK".to_string()),
                        None,
                    ]),
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn columns_are_looked_up_by_name() {
        let table = table();

        assert_eq!(table.nrows(), 3);
        assert_eq!(table.column("Luas  m2").map(|c| c.non_null()), Some(2));
        assert_eq!(
            table.column("POTENSI TOL").map(|c| c.kind()),
            Some(ColumnKind::Categorical)
        );
        assert!(table.column("NO").is_none());
    }

    #[test]
    fn selected_rows_keep_their_index() {
        let table = table().select_rows(&[2, 0]);

        assert_eq!(table.rows(), &[2, 0]);
        assert_eq!(
            table.column("Luas  m2"),
            Some(&Column::Numeric(vec![Some(80.5), Some(120.)]))
        );
    }

    #[test]
    fn dropping_a_column() {
        let mut table = table();

        assert!(table.drop_column("Luas  m2").is_some());
        assert!(table.drop_column("Luas  m2").is_none());
        assert_eq!(table.names(), &["POTENSI TOL".to_string()]);
    }

    #[test]
    fn columns_must_match_row_count() {
        let res = Table::new(
            vec![0, 1],
            vec![("A".to_string(), Column::Numeric(vec![Some(1.)]))],
        );

        assert!(matches!(res, Err(LoadError::ColumnLength { found: 1, .. })));
    }

    #[test]
    fn renders_head_as_text() {
        let text = table().head(2).to_string();
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   Luas  m2  POTENSI TOL");
        assert_eq!(lines[1], "0       120           YA");
        assert_eq!(lines[2], "1       NaN        TIDAK");
    }
}
