//! Descriptive statistics of a loaded table
//!
//! These are the numbers behind the overview sections: column info, the numeric description,
//! per-column value counts, the area distribution and the class distribution of the target.
use std::collections::HashMap;
use std::fmt;

use ndarray::Array1;
use ndarray_stats::{interpolate::Linear, Quantile1dExt};
use noisy_float::types::{n64, N64};

use crate::schema::ColumnKind;
use crate::table::{Column, Table};

/// Non-null count and kind of one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub kind: ColumnKind,
}

/// Structure of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

pub fn info(table: &Table) -> TableInfo {
    TableInfo {
        rows: table.nrows(),
        columns: table
            .columns()
            .map(|(name, column)| ColumnInfo {
                name: name.to_string(),
                non_null: column.non_null(),
                kind: column.kind(),
            })
            .collect(),
    }
}

impl fmt::Display for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} rows, {} columns", self.rows, self.columns.len())?;
        let width = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(6);

        writeln!(
            f,
            " #  {:<width$}  {:>14}  {}",
            "Column",
            "Non-Null Count",
            "Kind",
            width = width
        )?;
        for (idx, column) in self.columns.iter().enumerate() {
            writeln!(
                f,
                "{:>2}  {:<width$}  {:>14}  {}",
                idx,
                column.name,
                format!("{} non-null", column.non_null),
                column.kind,
                width = width
            )?;
        }

        Ok(())
    }
}

/// Location and spread of a numeric column
///
/// Statistics of a column without any value are `NaN`, the standard deviation of a single value
/// as well.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Quartiles with linear interpolation between the closest ranks
fn quartiles(values: &[f64]) -> Option<(f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let mut data = values.iter().map(|v| n64(*v)).collect::<Array1<N64>>();
    let mut q = |p: f64| {
        data.quantile_mut(n64(p), &Linear)
            .map(|v| v.raw())
            .unwrap_or(f64::NAN)
    };

    Some((q(0.25), q(0.5), q(0.75)))
}

fn describe_values(column: &str, values: &[f64]) -> NumericSummary {
    let data = Array1::from(values.to_vec());
    let (q25, median, q75) = quartiles(values).unwrap_or((f64::NAN, f64::NAN, f64::NAN));
    let std = if values.len() > 1 {
        data.std(1.0)
    } else {
        f64::NAN
    };

    NumericSummary {
        column: column.to_string(),
        count: values.len(),
        mean: data.mean().unwrap_or(f64::NAN),
        std,
        min: values.iter().copied().fold(f64::NAN, f64::min),
        q25,
        median,
        q75,
        max: values.iter().copied().fold(f64::NAN, f64::max),
    }
}

/// Describe every numeric column, missing cells are skipped
pub fn describe(table: &Table) -> Vec<NumericSummary> {
    table
        .columns()
        .filter_map(|(name, column)| {
            column.as_numeric().map(|cells| {
                let values = cells.iter().flatten().copied().collect::<Vec<_>>();
                describe_values(name, &values)
            })
        })
        .collect()
}

/// Count the labels, most frequent first and equal counts by label
pub fn count_labels<'a, I: IntoIterator<Item = &'a str>>(labels: I) -> Vec<(String, usize)> {
    let mut counts = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut counts = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    counts
}

/// Value counts of every categorical column, missing cells are skipped
pub fn value_counts(table: &Table) -> Vec<(String, Vec<(String, usize)>)> {
    table
        .columns()
        .filter_map(|(name, column)| {
            column.as_categorical().map(|cells| {
                let counts = count_labels(cells.iter().flatten().map(|c| c.as_str()));
                (name.to_string(), counts)
            })
        })
        .collect()
}

/// Box plot statistics
///
/// Whiskers reach the most extreme values within 1.5 interquartile ranges of the quartiles.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    /// Values beyond the whiskers
    pub outliers: usize,
}

/// Equal width histogram normalized to a density
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` edges, ascending
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// `count / (total * width)`, integrates to one
    pub density: Vec<f64>,
}

impl Histogram {
    /// Bin the values into `bins` equally wide bins spanning their range
    ///
    /// The last bin is closed on the right. A set of equal values is spread over a range of one
    /// around its value.
    pub fn new(values: &[f64], bins: usize) -> Histogram {
        let bins = bins.max(1);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if values.is_empty() {
            (0.0, 1.0)
        } else if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0; bins];
        for value in values {
            let idx = (((value - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let total = values.len().max(1) as f64;
        Histogram {
            edges: (0..=bins).map(|i| lo + width * i as f64).collect(),
            density: counts
                .iter()
                .map(|c| *c as f64 / (total * width))
                .collect(),
            counts,
        }
    }
}

/// Distribution of the non-missing area values
#[derive(Debug, Clone, PartialEq)]
pub struct AreaDistribution {
    pub summary: NumericSummary,
    pub boxplot: BoxStats,
    pub histogram: Histogram,
}

/// Box statistics and histogram of a numeric column
///
/// Returns `None` if the column does not exist, is not numeric or has no value.
pub fn area_distribution(table: &Table, column: &str, bins: usize) -> Option<AreaDistribution> {
    let values = match table.column(column)? {
        Column::Numeric(cells) => cells.iter().flatten().copied().collect::<Vec<_>>(),
        Column::Categorical(_) => return None,
    };
    let (q1, median, q3) = quartiles(&values)?;

    let iqr = q3 - q1;
    let (low, high) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);
    let inside = values.iter().copied().filter(|v| *v >= low && *v <= high);
    let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
    let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);

    Some(AreaDistribution {
        summary: describe_values(column, &values),
        boxplot: BoxStats {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers: values.iter().filter(|v| **v < low || **v > high).count(),
        },
        histogram: Histogram::new(&values, bins),
    })
}

/// Count and share of one class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassShare {
    pub label: String,
    pub count: usize,
    /// Share of all labelled rows, in percent
    pub percent: f64,
}

/// Class shares of the labels, most frequent first
pub fn class_distribution<'a, I: IntoIterator<Item = &'a str>>(labels: I) -> Vec<ClassShare> {
    let counts = count_labels(labels);
    let total = counts.iter().map(|(_, c)| c).sum::<usize>();

    counts
        .into_iter()
        .map(|(label, count)| ClassShare {
            label,
            count,
            percent: 100.0 * count as f64 / total.max(1) as f64,
        })
        .collect()
}

/// Class shares of a categorical column, `None` if it does not exist or is numeric
pub fn target_distribution(table: &Table, column: &str) -> Option<Vec<ClassShare>> {
    let cells = table.column(column)?.as_categorical()?;

    Some(class_distribution(cells.iter().flatten().map(|c| c.as_str())))
}
