//! Text rendering of an analysis run
use std::fmt;

use ip4t_datasets::summary::{AreaDistribution, ClassShare, NumericSummary};

use crate::config::DashboardConfig;
use crate::pipeline::{AnalysisReport, Modeling, SectionOutcome};

const TITLE: &str = "ANALISIS DATASET PROGRAM IP4T DAN MODEL RANDOM FOREST CLASSIFIER";
const BAR_WIDTH: usize = 40;

/// Title lines shown when the dashboard starts
pub fn banner(config: &DashboardConfig) -> String {
    let mut banner = format!("{}\n{}\n", TITLE, "=".repeat(TITLE.len()));
    if config.logo_path.is_file() {
        banner.push_str(&format!("logo: {}\n", config.logo_path.display()));
    }

    banner
}

fn header(f: &mut fmt::Formatter, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "== {} ==", title)
}

fn outcome<T>(
    f: &mut fmt::Formatter,
    section: &SectionOutcome<T>,
    render: impl FnOnce(&mut fmt::Formatter, &T) -> fmt::Result,
) -> fmt::Result {
    match section {
        SectionOutcome::Ok(value) => render(f, value),
        SectionOutcome::Skipped(reason) => writeln!(f, "warning: {}", reason),
        SectionOutcome::Failed(message) => {
            writeln!(f, "error while training the model: {}", message)
        }
    }
}

fn numeric_table(f: &mut fmt::Formatter, summaries: &[NumericSummary]) -> fmt::Result {
    if summaries.is_empty() {
        return writeln!(f, "no numeric columns found");
    }
    let width = summaries
        .iter()
        .map(|s| s.column.chars().count())
        .max()
        .unwrap_or(0);

    write!(f, "{:<width$}", "", width = width)?;
    for name in &["count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
        write!(f, " {:>12}", name)?;
    }
    writeln!(f)?;

    for s in summaries {
        write!(f, "{:<width$} {:>12}", s.column, s.count, width = width)?;
        for value in &[s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max] {
            write!(f, " {:>12.3}", value)?;
        }
        writeln!(f)?;
    }

    Ok(())
}

fn shares(f: &mut fmt::Formatter, shares: &[ClassShare]) -> fmt::Result {
    let max = shares.iter().map(|s| s.count).max().unwrap_or(0).max(1);
    for share in shares {
        writeln!(
            f,
            "{:<16} {:>6} {:>6.1}%  {}",
            share.label,
            share.count,
            share.percent,
            "#".repeat(share.count * BAR_WIDTH / max)
        )?;
    }

    Ok(())
}

fn area(f: &mut fmt::Formatter, area: &AreaDistribution) -> fmt::Result {
    let b = &area.boxplot;
    writeln!(
        f,
        "box: whiskers {:.2} .. {:.2}, quartiles {:.2} / {:.2} / {:.2}, {} outliers",
        b.lower_whisker, b.upper_whisker, b.q1, b.median, b.q3, b.outliers
    )?;
    writeln!(f, "histogram ({} values, density):", area.summary.count)?;

    let hist = &area.histogram;
    let max = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    for (idx, (count, density)) in hist.counts.iter().zip(&hist.density).enumerate() {
        writeln!(
            f,
            "{:>12.2} - {:>12.2} {:>10.6}  {}",
            hist.edges[idx],
            hist.edges[idx + 1],
            density,
            "#".repeat(count * BAR_WIDTH / max)
        )?;
    }

    Ok(())
}

fn modeling(f: &mut fmt::Formatter, modeling: &Modeling) -> fmt::Result {
    writeln!(
        f,
        "{} training rows, {} test rows, {} features",
        modeling.train_rows.len(),
        modeling.test_rows.len(),
        modeling.feature_names.len()
    )?;

    header(f, "Target distribution after SMOTE")?;
    shares(f, &modeling.balanced)?;

    header(f, "Confusion matrix after SMOTE")?;
    writeln!(f, "rows: actual, columns: predicted")?;
    write!(f, "{}", modeling.confusion)?;

    header(f, "Classification report")?;
    write!(f, "{}", modeling.report)
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "dataset: {}", self.dataset_path.display())?;
        if self.dropped_index {
            writeln!(f, "index column dropped")?;
        }
        for warning in &self.warnings {
            writeln!(f, "warning: {}", warning)?;
        }

        header(f, "Initial data")?;
        write!(f, "{}", self.overview.head)?;

        header(f, "DataFrame structure")?;
        write!(f, "{}", self.overview.info)?;

        header(f, "Numeric description")?;
        numeric_table(f, &self.overview.numeric)?;

        header(f, "Categorical value counts")?;
        if self.overview.categorical.is_empty() {
            writeln!(f, "no categorical columns found")?;
        }
        for (column, counts) in &self.overview.categorical {
            writeln!(f, "-- {} --", column)?;
            for (value, count) in counts {
                writeln!(f, "{:<24} {:>6}", value, count)?;
            }
        }

        header(f, "Area distribution")?;
        outcome(f, &self.area, area)?;

        header(f, "Target distribution")?;
        outcome(f, &self.target, |f, s| shares(f, s))?;

        header(f, "Model")?;
        outcome(f, &self.modeling, modeling)?;

        header(f, "Decision tree viewer")?;
        writeln!(f, "enter 'tree <n>' to show a member tree of the forest")
    }
}
