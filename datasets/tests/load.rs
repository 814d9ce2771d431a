use std::io::Write;

use approx::assert_abs_diff_eq;
use ip4t_datasets::summary::{area_distribution, describe, info, target_distribution};
use ip4t_datasets::{load, Column, ColumnKind, LoadError, LoadOptions};
use tempfile::NamedTempFile;

fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_program_dataset_from_disk() {
    let file = fixture(
        "NO;DESA;Luas  m2;STATUS;POTENSI TOL\n\
         1;CIBINONG;120;SHM;YA\n\
         2;CIBINONG;-;SHM;TIDAK\n\
         3;SUKAMAJU;310;;TIDAK\n\
         4;SUKAMAJU;95;HGB;TIDAK\n",
    );

    let report = load(file.path(), &LoadOptions::default()).unwrap();
    let table = &report.table;

    assert!(report.dropped_index);
    assert_eq!(report.invalid_area, 1);
    assert_eq!(table.nrows(), 4);
    assert_eq!(table.rows(), &[0, 1, 2, 3]);

    let structure = info(table);
    assert_eq!(structure.columns.len(), 4);
    assert_eq!(structure.columns[1].name, "Luas  m2");
    assert_eq!(structure.columns[1].non_null, 3);
    assert_eq!(structure.columns[2].kind, ColumnKind::Categorical);
    assert_eq!(structure.columns[2].non_null, 3);

    let summaries = describe(table);
    assert_eq!(summaries.len(), 1);
    assert_abs_diff_eq!(summaries[0].median, 120.0);

    let area = area_distribution(table, "Luas  m2", 30).unwrap();
    assert_eq!(area.histogram.counts.iter().sum::<usize>(), 3);

    let shares = target_distribution(table, "POTENSI TOL").unwrap();
    assert_eq!(shares[0].label, "TIDAK");
    assert_abs_diff_eq!(shares[0].percent, 75.0);

    assert_eq!(
        table.head(1).column("DESA"),
        Some(&Column::Categorical(vec![Some("CIBINONG".to_string())]))
    );
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let res = load(dir.path().join("tidak-ada.csv"), &LoadOptions::default());

    assert!(matches!(res, Err(LoadError::Open { .. })));
}

#[test]
fn file_without_area_or_target_still_loads() {
    let file = fixture("DESA;JUMLAH\nCIBINONG;3\n");
    let report = load(file.path(), &LoadOptions::default()).unwrap();

    assert!(report.is_missing("Luas  m2"));
    assert!(report.is_missing("POTENSI TOL"));
    assert!(area_distribution(&report.table, "Luas  m2", 30).is_none());
    assert!(target_distribution(&report.table, "POTENSI TOL").is_none());
}
